//! Error types for tinsel

use thiserror::Error;

/// The main error type for tinsel operations
#[derive(Debug, Error)]
pub enum TinselError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Invalid color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Result type alias for tinsel operations
pub type Result<T> = std::result::Result<T, TinselError>;

impl From<toml::de::Error> for TinselError {
    fn from(err: toml::de::Error) -> Self {
        TinselError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for TinselError {
    fn from(err: toml::ser::Error) -> Self {
        TinselError::TomlSerError(err.to_string())
    }
}
