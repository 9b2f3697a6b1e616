//! Schema validation.
//!
//! Builder calls already enforce bounds, default values and the
//! parameters-or-subcommands rule. Names and descriptions are free-form at
//! construction time, so they are checked here before a schema is handed to
//! a parser. Schemas loaded from JSON or YAML go through the same pass.
//!
//! # Examples
//!
//! ```
//! use argschema_core::*;
//!
//! let command = Command::new("tool", "Does things")
//!     .with_parameter(Parameter::boolean("verbose", "Talk more"))
//!     .unwrap();
//! assert!(validate_command(&command).is_empty());
//!
//! // Invalid: parameter name contains '='
//! let bad = Command::new("tool", "Does things")
//!     .with_parameter(Parameter::boolean("a=b", "Broken"))
//!     .unwrap();
//! assert_eq!(validate_command(&bad), vec![SchemaError::InvalidName("a=b".into())]);
//! ```

use crate::container::{Command, ParameterContainer};
use crate::error::SchemaError;

/// Validates a command schema.
///
/// Checks names and descriptions of the command, its subcommands and all
/// parameters, and re-checks that the command does not mix parameters and
/// subcommands. Validation stops at the first error.
pub fn validate_command(command: &Command) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    if let Err(e) = validate_item(command.name(), command.description()) {
        errors.push(e);
        return errors;
    }

    if command.has_subcommands() && !command.parameters().is_empty() {
        errors.push(SchemaError::MixedContainer(command.name().to_string()));
        return errors;
    }

    errors.extend(validate_parameters(command));
    if !errors.is_empty() {
        return errors;
    }

    for sub in command.subcommands() {
        if let Err(e) = validate_item(sub.name(), sub.description()) {
            errors.push(e);
            return errors;
        }
        errors.extend(validate_parameters(sub));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_parameters(container: &impl ParameterContainer) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    for param in container.parameters() {
        if let Err(e) = validate_item(param.name(), param.description()) {
            errors.push(e);
            return errors;
        }
    }

    errors
}

fn validate_item(name: &str, description: &str) -> Result<(), SchemaError> {
    validate_name(name)?;
    if description.trim().is_empty() {
        return Err(SchemaError::EmptyDescription(name.to_string()));
    }
    Ok(())
}

/// Names appear on the command line as `<name>` or `--<name>=`, so they
/// must be non-empty and free of whitespace and `=`, and must not start
/// with `-`.
fn validate_name(name: &str) -> Result<(), SchemaError> {
    if name.trim().is_empty() {
        return Err(SchemaError::EmptyName);
    }
    if name.starts_with('-') || name.contains('=') || name.chars().any(char::is_whitespace) {
        return Err(SchemaError::InvalidName(name.to_string()));
    }
    Ok(())
}
