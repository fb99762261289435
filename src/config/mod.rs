#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::equivalents::ProfileTable;
use crate::core::pipeline::ShareSettings;
use crate::core::ConfigProvider;
use crate::domain::model::Region;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};

pub const DEFAULT_PAGE_URL: &str = "https://greencommute.app/impact";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// 命令列覆寫值；`None` 表示沿用設定檔或預設值
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub page_url: Option<String>,
    pub output_path: Option<String>,
    pub pixel_ratio: Option<f32>,
    pub region: Option<Region>,
    pub share_command: Option<Vec<String>>,
    pub open_links: Option<bool>,
}

/// 合併 (預設值 < 設定檔 < 命令列) 後的最終設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub page_url: String,
    pub output_path: String,
    pub pixel_ratio: f32,
    pub region: Region,
    pub share_command: Option<Vec<String>>,
    pub share_files: bool,
    pub open_command: Option<String>,
    pub open_links: bool,
    pub profiles: ProfileTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            pixel_ratio: ShareSettings::DEFAULT_PIXEL_RATIO,
            region: Region::default(),
            share_command: None,
            share_files: true,
            open_command: None,
            open_links: false,
            profiles: ProfileTable::builtin(),
        }
    }
}

impl Settings {
    pub fn resolve(file: Option<&TomlConfig>, overrides: &SettingsOverrides) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(file) = file {
            file.validate()?;
            let share = &file.share;
            if let Some(page_url) = &share.page_url {
                settings.page_url = page_url.clone();
            }
            if let Some(output_path) = &share.output_path {
                settings.output_path = output_path.clone();
            }
            if let Some(ratio) = share.pixel_ratio {
                settings.pixel_ratio = ratio;
            }
            if let Some(region) = file.impact.region {
                settings.region = region;
            }
            settings.share_command = share.share_command.clone();
            settings.share_files = share.share_files.unwrap_or(true);
            settings.open_command = share.open_command.clone();
            settings.open_links = share.open_links.unwrap_or(false);
            settings.profiles = file.profile_table()?;
        }

        if let Some(page_url) = &overrides.page_url {
            settings.page_url = page_url.clone();
        }
        if let Some(output_path) = &overrides.output_path {
            settings.output_path = output_path.clone();
        }
        if let Some(ratio) = overrides.pixel_ratio {
            settings.pixel_ratio = ratio;
        }
        if let Some(region) = overrides.region {
            settings.region = region;
        }
        if let Some(command) = &overrides.share_command {
            settings.share_command = Some(command.clone());
        }
        if let Some(open_links) = overrides.open_links {
            settings.open_links = open_links;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("page_url", &self.page_url)?;
        validate_path("output_path", &self.output_path)?;
        validate_range("pixel_ratio", self.pixel_ratio, 1.0, 4.0)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn page_url(&self) -> &str {
        &self.page_url
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::resolve(None, &SettingsOverrides::default()).unwrap();
        assert_eq!(settings.page_url, DEFAULT_PAGE_URL);
        assert_eq!(settings.pixel_ratio, 2.0);
        assert_eq!(settings.region, Region::Germany);
        assert!(!settings.open_links);
    }

    #[test]
    fn test_command_line_wins_over_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[share]
page_url = "https://from-file.example/impact"
output_path = "./file-out"

[impact]
region = "australia"
"#,
        )
        .unwrap();
        let overrides = SettingsOverrides {
            page_url: Some("https://from-cli.example/impact".to_string()),
            region: Some(Region::UnitedStates),
            ..Default::default()
        };

        let settings = Settings::resolve(Some(&file), &overrides).unwrap();
        assert_eq!(settings.page_url, "https://from-cli.example/impact");
        assert_eq!(settings.output_path, "./file-out");
        assert_eq!(settings.region, Region::UnitedStates);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let overrides = SettingsOverrides {
            page_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(Settings::resolve(None, &overrides).is_err());

        let overrides = SettingsOverrides {
            pixel_ratio: Some(0.5),
            ..Default::default()
        };
        assert!(Settings::resolve(None, &overrides).is_err());
    }

    #[test]
    fn test_share_settings_follow_resolved_settings() {
        let overrides = SettingsOverrides {
            page_url: Some("https://example.org/me".to_string()),
            pixel_ratio: Some(3.0),
            ..Default::default()
        };
        let settings = Settings::resolve(None, &overrides).unwrap();

        let share = ShareSettings::from_config(&settings);
        assert_eq!(share.page_url, "https://example.org/me");
        assert_eq!(share.pixel_ratio, 3.0);
    }
}
