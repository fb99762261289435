use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreenError {
    #[error("Could not generate image: {message}")]
    RenderFailure { message: String },

    #[error("Sharing not available: {message}")]
    ShareUnavailable { message: String },

    #[error("Share cancelled by user")]
    ShareCancelled,

    #[error("Download failed: {message}")]
    DownloadFailure { message: String },

    #[error("Invalid impact profile '{region}': {reason}")]
    InvalidProfile { region: String, reason: String },

    #[error("Invalid impact snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Render,
    Share,
    Storage,
    Configuration,
    Input,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GreenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GreenError::RenderFailure { .. } => ErrorCategory::Render,
            GreenError::ShareUnavailable { .. } | GreenError::ShareCancelled => {
                ErrorCategory::Share
            }
            GreenError::DownloadFailure { .. } | GreenError::IoError(_) => ErrorCategory::Storage,
            GreenError::ConfigError { .. }
            | GreenError::InvalidConfigValueError { .. }
            | GreenError::InvalidProfile { .. } => ErrorCategory::Configuration,
            GreenError::InvalidSnapshot { .. } => ErrorCategory::Input,
            GreenError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者取消，不算失敗
            GreenError::ShareCancelled => ErrorSeverity::Low,
            GreenError::RenderFailure { .. }
            | GreenError::ShareUnavailable { .. }
            | GreenError::DownloadFailure { .. } => ErrorSeverity::Medium,
            GreenError::InvalidSnapshot { .. }
            | GreenError::ConfigError { .. }
            | GreenError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            GreenError::InvalidProfile { .. }
            | GreenError::IoError(_)
            | GreenError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GreenError::RenderFailure { .. } => "Could not generate image".to_string(),
            GreenError::ShareUnavailable { .. } | GreenError::ShareCancelled => {
                "Sharing not available".to_string()
            }
            GreenError::DownloadFailure { .. } => "Could not save the share card".to_string(),
            GreenError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Render => "Please try again.",
            ErrorCategory::Share => "Try downloading the image instead.",
            ErrorCategory::Storage => "Check that the output directory exists and is writable.",
            ErrorCategory::Configuration => "Review the configuration file and command-line flags.",
            ErrorCategory::Input => "The CO₂ savings must be a finite number of at least zero.",
            ErrorCategory::Internal => "Re-run with --verbose and check the logs.",
        }
    }
}

pub type Result<T> = std::result::Result<T, GreenError>;
