//! Error types for the segmentation core
//!
//! Segmentation itself is total over its input; only configuration
//! loading and classifier adapters can fail.

use thiserror::Error;

/// Core-level errors
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid or unparsable configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by a language classifier adapter
    #[error("classifier error: {0}")]
    Classifier(String),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
