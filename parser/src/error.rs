//! Error types for parsing and configuration loading.

use argschema_core::{ParameterError, SchemaError};
use thiserror::Error;

/// A failed parse, already rendered as a usage block.
///
/// `Display` prints the full block (error line, synopsis, description and
/// option table). The underlying [`ParameterError`] is kept as the error
/// source for callers that want to log it separately.
#[derive(Debug, Clone, Error)]
#[error("{usage}")]
pub struct UsageError {
    usage: String,
    #[source]
    cause: ParameterError,
}

impl UsageError {
    pub(crate) fn new(usage: String, cause: ParameterError) -> Self {
        Self { usage, cause }
    }

    /// The rendered usage block.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    /// The validation failure that triggered the usage block.
    pub fn cause(&self) -> &ParameterError {
        &self.cause
    }
}

/// Errors that can occur while loading configuration or schema files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Help width too small to lay out an option table.
    #[error("invalid help width {width}: must be at least {min}")]
    InvalidWidth { width: usize, min: usize },

    /// The loaded schema failed validation.
    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] SchemaError),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
