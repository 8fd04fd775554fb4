use crate::domain::model::TileKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Tile {key} has no data available")]
    TileNotAvailable { key: TileKey },

    #[error("Terrain source is not ready")]
    SourceNotReady,

    #[error("Heightmap has {actual} samples, expected {expected}")]
    GeometrySizeMismatch { expected: usize, actual: usize },

    #[error("Terrain source error: {message}")]
    SourceError { message: String },

    #[error("Method not implemented: {operation}")]
    NotImplemented { operation: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Source,
    Data,
    Contract,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TerrainError {
    pub fn source_error(message: impl Into<String>) -> Self {
        Self::SourceError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::SourceNotReady | Self::SourceError { .. } => ErrorCategory::Source,
            Self::TileNotAvailable { .. } | Self::GeometrySizeMismatch { .. } => {
                ErrorCategory::Data
            }
            Self::NotImplemented { .. } => ErrorCategory::Contract,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TileNotAvailable { .. } => ErrorSeverity::Low,
            Self::SourceNotReady | Self::SourceError { .. } => ErrorSeverity::Medium,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::GeometrySizeMismatch { .. }
            | Self::NotImplemented { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::TileNotAvailable { key } => {
                format!("No terrain data exists for tile {}", key)
            }
            Self::SourceNotReady => "The terrain source is still initialising".to_string(),
            Self::GeometrySizeMismatch { expected, actual } => format!(
                "The terrain source returned {} height samples instead of {}",
                actual, expected
            ),
            Self::NotImplemented { operation } => {
                format!("The terrain provider does not support {}", operation)
            }
            Self::MissingConfigError { field } => {
                format!("The configuration file does not set {}", field)
            }
            Self::IoError(e) => format!("Could not read terrain data: {}", e),
            Self::SerializationError(e) => format!("Could not encode tile summaries: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the configuration file against the documented sections",
            ErrorCategory::Source => "Make sure the terrain source is reachable and finished loading",
            ErrorCategory::Data => "Request a tile inside the available range or regenerate the tile set",
            ErrorCategory::Contract => "Use an operation the provider implements",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, TerrainError>;
