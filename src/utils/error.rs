use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid slot state: {reason}")]
    InvalidState { reason: String },

    #[error("Ambiguous selection: {matched} assignments matched, expected exactly one")]
    AmbiguousSelection { matched: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error: field '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Platform error: {message}")]
    PlatformError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    State,
    Selection,
    Configuration,
    Validation,
    Platform,
    System,
}

impl SlotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidState { .. } => ErrorCategory::State,
            Self::AmbiguousSelection { .. } => ErrorCategory::Selection,
            Self::ConfigParseError(_) | Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::PlatformError { .. } => ErrorCategory::Platform,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AmbiguousSelection { .. } => ErrorSeverity::Medium,
            Self::ConfigParseError(_) | Self::ConfigError { .. } | Self::ValidationError { .. } => {
                ErrorSeverity::Medium
            }
            Self::InvalidState { .. } | Self::PlatformError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidState { .. } => {
                "Re-read the device state before retrying; the current mapping does not match what this request assumes".to_string()
            }
            Self::AmbiguousSelection { .. } => {
                "Pass an explicit descriptor (logical slot and port) to pick which binding should move".to_string()
            }
            Self::ConfigParseError(_) | Self::ConfigError { .. } => {
                "Check the configuration file syntax and required fields".to_string()
            }
            Self::ValidationError { field, .. } => {
                format!("Fix the value supplied for '{}' and run again", field)
            }
            Self::PlatformError { .. } => {
                "Verify the device state file describes the slots and ports this request targets".to_string()
            }
            Self::IoError(_) => "Check file paths and permissions".to_string(),
            Self::SerializationError(_) => {
                "The state file is not valid JSON; restore it or regenerate it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidState { reason } => {
                format!("The current slot mapping cannot be used: {}", reason)
            }
            Self::AmbiguousSelection { matched } => format!(
                "Could not decide which binding to replace ({} candidates)",
                matched
            ),
            Self::ConfigParseError(e) => format!("Could not read the configuration: {}", e),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ValidationError { field, reason } => {
                format!("Invalid value for '{}': {}", field, reason)
            }
            Self::PlatformError { message } => format!("Device state problem: {}", message),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(e) => format!("State file is corrupt: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
