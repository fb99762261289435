use crate::domain::model::{DerivedEquivalents, ImpactProfile, Region};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

// 內建地區係數：kg CO₂ / 家庭日、kg CO₂ / 行車公里、kg CO₂ / 每棵樹每年吸收量
const BUILTIN_PROFILES: [ImpactProfile; 3] = [
    ImpactProfile::builtin(Region::Germany, 15.0, 0.16, 21.0),
    ImpactProfile::builtin(Region::UnitedStates, 18.0, 0.25, 21.0),
    ImpactProfile::builtin(Region::Australia, 20.0, 0.19, 21.0),
];

/// 以地區為索引的不可變係數表
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    profiles: [ImpactProfile; 3],
}

/// 設定檔裡針對單一地區的係數覆寫
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOverride {
    pub region: Region,
    pub home_day_kg: Option<f64>,
    pub car_kg_per_km: Option<f64>,
    pub tree_kg_per_year: Option<f64>,
}

impl ProfileTable {
    pub fn builtin() -> Self {
        Self {
            profiles: BUILTIN_PROFILES,
        }
    }

    /// 套用覆寫後回傳新的表；任何無效係數都會直接失敗
    pub fn with_overrides(&self, overrides: &[ProfileOverride]) -> Result<Self> {
        let mut profiles = self.profiles;
        for item in overrides {
            let base = profiles[item.region.index()];
            profiles[item.region.index()] = ImpactProfile::new(
                item.region,
                item.home_day_kg.unwrap_or(base.home_day_kg()),
                item.car_kg_per_km.unwrap_or(base.car_kg_per_km()),
                item.tree_kg_per_year.unwrap_or(base.tree_kg_per_year()),
            )?;
            tracing::debug!("Applied profile override for {}", item.region);
        }
        Ok(Self { profiles })
    }

    pub fn get(&self, region: Region) -> &ImpactProfile {
        &self.profiles[region.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImpactProfile> {
        self.profiles.iter()
    }
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 把節省的 CO₂ 換算成三種生活化的等價量，每一項至少為 1。
///
/// `co2_saved_kg` 由 [`ImpactSnapshot`](crate::domain::model::ImpactSnapshot) 保證為有限且 >= 0。
pub fn compute(co2_saved_kg: f64, profile: &ImpactProfile) -> DerivedEquivalents {
    DerivedEquivalents {
        days_powered: at_least_one(co2_saved_kg / profile.home_day_kg()),
        trees_planted: at_least_one(co2_saved_kg / profile.tree_kg_per_year()),
        km_driven: at_least_one(co2_saved_kg / profile.car_kg_per_km()),
    }
}

fn at_least_one(units: f64) -> u64 {
    // `as` 對 NaN 會得到 0，之後再被 max 拉回 1
    (units.round() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_are_valid() {
        for profile in ProfileTable::builtin().iter() {
            assert!(ImpactProfile::new(
                profile.region(),
                profile.home_day_kg(),
                profile.car_kg_per_km(),
                profile.tree_kg_per_year(),
            )
            .is_ok());
        }
    }

    #[test]
    fn test_table_is_keyed_by_region() {
        let table = ProfileTable::builtin();
        for region in Region::ALL {
            assert_eq!(table.get(region).region(), region);
        }
    }

    #[test]
    fn test_germany_scenario() {
        let table = ProfileTable::builtin();
        let result = compute(123.4, table.get(Region::Germany));
        assert_eq!(
            result,
            DerivedEquivalents {
                days_powered: 8,
                trees_planted: 6,
                km_driven: 771,
            }
        );
    }

    #[test]
    fn test_zero_savings_reports_one_of_each() {
        let table = ProfileTable::builtin();
        for profile in table.iter() {
            let result = compute(0.0, profile);
            assert_eq!(result.days_powered, 1);
            assert_eq!(result.trees_planted, 1);
            assert_eq!(result.km_driven, 1);
        }
    }

    #[test]
    fn test_values_below_one_unit_still_report_one() {
        let table = ProfileTable::builtin();
        let result = compute(0.05, table.get(Region::Germany));
        assert_eq!(result.days_powered, 1);
        assert_eq!(result.trees_planted, 1);
        assert_eq!(result.km_driven, 1);
    }

    #[test]
    fn test_monotonic_in_savings() {
        let table = ProfileTable::builtin();
        for profile in table.iter() {
            let mut previous = compute(0.0, profile);
            for step in 1..=2000 {
                let current = compute(step as f64 * 0.75, profile);
                assert!(current.days_powered >= previous.days_powered);
                assert!(current.trees_planted >= previous.trees_planted);
                assert!(current.km_driven >= previous.km_driven);
                previous = current;
            }
        }
    }

    #[test]
    fn test_overrides_replace_only_given_factors() {
        let table = ProfileTable::builtin()
            .with_overrides(&[ProfileOverride {
                region: Region::Germany,
                home_day_kg: Some(10.0),
                car_kg_per_km: None,
                tree_kg_per_year: None,
            }])
            .unwrap();

        let germany = table.get(Region::Germany);
        assert_eq!(germany.home_day_kg(), 10.0);
        assert_eq!(germany.car_kg_per_km(), 0.16);
        assert_eq!(table.get(Region::Australia), ProfileTable::builtin().get(Region::Australia));
    }

    #[test]
    fn test_invalid_override_fails_fast() {
        let result = ProfileTable::builtin().with_overrides(&[ProfileOverride {
            region: Region::UnitedStates,
            home_day_kg: None,
            car_kg_per_km: Some(0.0),
            tree_kg_per_year: None,
        }]);
        assert!(result.is_err());
    }
}
