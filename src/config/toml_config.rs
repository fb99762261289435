use crate::core::equivalents::{ProfileOverride, ProfileTable};
use crate::domain::model::Region;
use crate::utils::error::{GreenError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub impact: ImpactConfig,
    #[serde(default)]
    pub profiles: Vec<ProfileOverride>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareConfig {
    pub page_url: Option<String>,
    pub output_path: Option<String>,
    pub pixel_ratio: Option<f32>,
    pub share_command: Option<Vec<String>>,
    pub share_files: Option<bool>,
    pub open_command: Option<String>,
    pub open_links: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImpactConfig {
    pub region: Option<Region>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GreenError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GreenError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PAGE_URL})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| GreenError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用設定檔中的係數覆寫
    pub fn profile_table(&self) -> Result<ProfileTable> {
        ProfileTable::builtin().with_overrides(&self.profiles)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(page_url) = &self.share.page_url {
            validate_url("share.page_url", page_url)?;
        }
        if let Some(output_path) = &self.share.output_path {
            validate_path("share.output_path", output_path)?;
        }
        if let Some(ratio) = self.share.pixel_ratio {
            validate_range("share.pixel_ratio", ratio, 1.0, 4.0)?;
        }
        if let Some(command) = &self.share.share_command {
            if command.is_empty() {
                return Err(GreenError::InvalidConfigValueError {
                    field: "share.share_command".to_string(),
                    value: "[]".to_string(),
                    reason: "Command must have at least a program name".to_string(),
                });
            }
        }
        if let Some(program) = &self.share.open_command {
            validate_non_empty_string("share.open_command", program)?;
        }
        self.profile_table()?;
        Ok(())
    }
}
