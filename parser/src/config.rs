//! Parser configuration and schema file loading.
//!
//! # Example YAML
//!
//! ```yaml
//! help:
//!   width: 100
//! ```
//!
//! Every field is optional; missing fields fall back to their defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use argschema_core::{Command, ParameterContainer, validate_command};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::help::DEFAULT_WIDTH;

/// Narrowest help width that still leaves room for an option table.
pub const MIN_WIDTH: usize = 20;

/// Help rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Maximum line width in columns.
    pub width: usize,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

/// Top-level parser configuration.
///
/// # Examples
///
/// ```
/// use argschema_parser::ParserConfig;
///
/// let config = ParserConfig::from_yaml_str("help:\n  width: 100\n").unwrap();
/// assert_eq!(config.help.width, 100);
///
/// assert_eq!(ParserConfig::from_yaml_str("{}").unwrap(), ParserConfig::default());
/// assert!(ParserConfig::from_yaml_str("help:\n  width: 5\n").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub help: HelpConfig,
}

impl ParserConfig {
    /// Loads configuration from a YAML (or JSON) file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be
    /// read, [`YamlError`](ConfigError::YamlError) if parsing fails, or
    /// [`InvalidWidth`](ConfigError::InvalidWidth) if the help width is
    /// below [`MIN_WIDTH`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_yaml::from_reader(BufReader::new(file))?;
        config.validate()?;
        debug!(path = %path.as_ref().display(), width = config.help.width, "Loaded parser config");
        Ok(config)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Same as [`load`](ParserConfig::load), minus I/O.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.help.width < MIN_WIDTH {
            return Err(ConfigError::InvalidWidth {
                width: self.help.width,
                min: MIN_WIDTH,
            });
        }
        Ok(())
    }
}

/// Loads a [`Command`] schema from a file and validates it.
///
/// Files ending in `.json` are read as JSON; anything else as YAML.
///
/// # Errors
///
/// Returns an I/O or format error if the file cannot be read or decoded
/// (including constructor-level schema errors such as inverted bounds), or
/// [`InvalidSchema`](ConfigError::InvalidSchema) with the first problem
/// [`validate_command`] reports.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Command> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let command: Command = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_reader(reader)?,
        _ => serde_yaml::from_reader(reader)?,
    };

    if let Some(error) = validate_command(&command).into_iter().next() {
        return Err(error.into());
    }

    debug!(path = %path.display(), command = command.name(), "Loaded schema");
    Ok(command)
}
