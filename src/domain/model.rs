use crate::utils::error::{GreenError, Result};
use crate::utils::validation::{validate_co2_saved, validate_positive_factor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 可選的地區 (固定列舉，不可在執行期新增)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[default]
    Germany,
    UnitedStates,
    Australia,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::Germany, Region::UnitedStates, Region::Australia];

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Germany => "Germany",
            Region::UnitedStates => "United States",
            Region::Australia => "Australia",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Region::Germany => "germany",
            Region::UnitedStates => "united-states",
            Region::Australia => "australia",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Region::Germany => 0,
            Region::UnitedStates => 1,
            Region::Australia => 2,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Region {
    type Err = GreenError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "germany" | "de" => Ok(Region::Germany),
            "united-states" | "us" | "usa" => Ok(Region::UnitedStates),
            "australia" | "au" => Ok(Region::Australia),
            _ => Err(GreenError::InvalidConfigValueError {
                field: "region".to_string(),
                value: s.to_string(),
                reason: format!(
                    "Unknown region. Valid regions: {}",
                    Region::ALL
                        .iter()
                        .map(|r| r.slug())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
        }
    }
}

/// 一個地區的 CO₂ 換算係數。
///
/// 只能透過 [`ImpactProfile::new`] 建立，係數一律為有限的正數。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactProfile {
    region: Region,
    home_day_kg: f64,
    car_kg_per_km: f64,
    tree_kg_per_year: f64,
}

impl ImpactProfile {
    pub fn new(
        region: Region,
        home_day_kg: f64,
        car_kg_per_km: f64,
        tree_kg_per_year: f64,
    ) -> Result<Self> {
        let checks = [
            ("home_day_kg", home_day_kg),
            ("car_kg_per_km", car_kg_per_km),
            ("tree_kg_per_year", tree_kg_per_year),
        ];
        for (field, value) in checks {
            validate_positive_factor(field, value).map_err(|e| GreenError::InvalidProfile {
                region: region.display_name().to_string(),
                reason: e.to_string(),
            })?;
        }

        Ok(Self {
            region,
            home_day_kg,
            car_kg_per_km,
            tree_kg_per_year,
        })
    }

    /// 內建表格專用；數值在 `core::equivalents` 的測試中經過 `new` 驗證
    pub(crate) const fn builtin(
        region: Region,
        home_day_kg: f64,
        car_kg_per_km: f64,
        tree_kg_per_year: f64,
    ) -> Self {
        Self {
            region,
            home_day_kg,
            car_kg_per_km,
            tree_kg_per_year,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn home_day_kg(&self) -> f64 {
        self.home_day_kg
    }

    pub fn car_kg_per_km(&self) -> f64 {
        self.car_kg_per_km
    }

    pub fn tree_kg_per_year(&self) -> f64 {
        self.tree_kg_per_year
    }
}

/// 呼叫端提供的 (顯示名稱, 節省的 CO₂ 公斤數)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactSnapshot {
    display_name: String,
    co2_saved_kg: f64,
}

impl ImpactSnapshot {
    pub fn new(display_name: impl Into<String>, co2_saved_kg: f64) -> Result<Self> {
        validate_co2_saved(co2_saved_kg)?;
        Ok(Self {
            display_name: display_name.into(),
            co2_saved_kg,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn co2_saved_kg(&self) -> f64 {
        self.co2_saved_kg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedEquivalents {
    pub days_powered: u64,
    pub trees_planted: u64,
    pub km_driven: u64,
}

/// 產生出來的分享圖 (PNG)，只在一次下載/分享/預覽期間存在
#[derive(Debug, Clone, PartialEq)]
pub struct ShareAsset {
    pub png: Vec<u8>,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

impl ShareAsset {
    pub const MIME_TYPE: &'static str = "image/png";
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// 交給原生分享選單的內容
#[derive(Debug, Clone, PartialEq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub files: Vec<ShareFile>,
}

impl SharePayload {
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn failure(title: &str, description: &str) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentPlatform {
    WhatsApp,
    X,
    Reddit,
}

impl IntentPlatform {
    pub const ALL: [IntentPlatform; 3] =
        [IntentPlatform::WhatsApp, IntentPlatform::X, IntentPlatform::Reddit];

    pub fn label(&self) -> &'static str {
        match self {
            IntentPlatform::WhatsApp => "WhatsApp",
            IntentPlatform::X => "X",
            IntentPlatform::Reddit => "Reddit",
        }
    }
}

impl FromStr for IntentPlatform {
    type Err = GreenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "whatsapp" => Ok(IntentPlatform::WhatsApp),
            "x" | "twitter" => Ok(IntentPlatform::X),
            "reddit" => Ok(IntentPlatform::Reddit),
            _ => Err(GreenError::InvalidConfigValueError {
                field: "platform".to_string(),
                value: s.to_string(),
                reason: "Valid platforms: whatsapp, x, reddit".to_string(),
            }),
        }
    }
}

/// 獎盃判定用的累積活動量
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTotals {
    pub co2_saved_kg: f64,
    pub bike_trips: u32,
    pub bus_rides: u32,
    pub km_walked: f64,
    pub streak_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrophyStatus {
    Unlocked,
    Next,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trophy {
    pub key: &'static str,
    pub title: &'static str,
    pub status: TrophyStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_from_str_accepts_aliases() {
        assert_eq!("Germany".parse::<Region>().unwrap(), Region::Germany);
        assert_eq!("united states".parse::<Region>().unwrap(), Region::UnitedStates);
        assert_eq!("US".parse::<Region>().unwrap(), Region::UnitedStates);
        assert_eq!("au".parse::<Region>().unwrap(), Region::Australia);
        assert!("atlantis".parse::<Region>().is_err());
    }

    #[test]
    fn test_profile_rejects_non_positive_factors() {
        assert!(ImpactProfile::new(Region::Germany, 15.0, 0.16, 21.0).is_ok());

        let err = ImpactProfile::new(Region::Germany, 0.0, 0.16, 21.0).unwrap_err();
        assert!(matches!(err, GreenError::InvalidProfile { .. }));
        assert!(ImpactProfile::new(Region::Germany, 15.0, -0.16, 21.0).is_err());
        assert!(ImpactProfile::new(Region::Germany, 15.0, 0.16, f64::NAN).is_err());
    }

    #[test]
    fn test_snapshot_rejects_negative_savings() {
        assert!(ImpactSnapshot::new("Alex", 0.0).is_ok());
        assert!(ImpactSnapshot::new("Alex", -1.0).is_err());
        assert!(ImpactSnapshot::new("Alex", f64::INFINITY).is_err());
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("Twitter".parse::<IntentPlatform>().unwrap(), IntentPlatform::X);
        assert_eq!("whatsapp".parse::<IntentPlatform>().unwrap(), IntentPlatform::WhatsApp);
        assert!("myspace".parse::<IntentPlatform>().is_err());
    }
}
