//! Error types for schema declaration and argument validation.
//!
//! Two families are kept apart:
//!
//! - [`ParameterError`] describes a problem with user input (a malformed
//!   token, an unknown key, a value that fails conversion or range checks).
//!   These are recoverable by the caller, who is expected to show the
//!   message and exit.
//! - [`SchemaError`] describes a bug in the declared schema itself (an empty
//!   name, inverted bounds, a command mixing parameters and subcommands).
//!   These are never produced by user input.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating user-supplied arguments.
///
/// The `Display` impl is the exact line shown after `Error: ` in the
/// rendered usage block.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// The raw value is empty (or blank, for non-string parameters).
    #[error("Parameter '{name}' requires a non-empty value")]
    EmptyValue { name: String },

    /// The raw value is neither `true` nor `false`.
    #[error("Parameter '{name}' expects a boolean value (false|true) but got '{raw}'")]
    InvalidBoolean { name: String, raw: String },

    /// The raw value is not a whole number.
    #[error("Parameter '{name}' expects an integer value but got '{raw}'")]
    InvalidInteger { name: String, raw: String },

    /// The raw value is not a finite decimal number.
    #[error("Parameter '{name}' expects a decimal value but got '{raw}'")]
    InvalidDouble { name: String, raw: String },

    /// Numeric value below the inclusive minimum.
    #[error("Value of parameter '{name}' must not be less than {min}")]
    TooSmall { name: String, min: String },

    /// Numeric value above the inclusive maximum.
    #[error("Value of parameter '{name}' must not be greater than {max}")]
    TooLarge { name: String, max: String },

    /// String value outside the declared set of allowed values.
    #[error("Value '{raw}' of parameter '{name}' is not one of {allowed}")]
    NotAllowed {
        name: String,
        raw: String,
        allowed: String,
    },

    /// The raw value cannot be turned into an absolute path.
    #[error("Parameter '{name}' expects a path but got '{raw}'")]
    InvalidPath { name: String, raw: String },

    /// A path that must exist does not.
    #[error("Path '{}' of parameter '{name}' does not exist", path.display())]
    PathNotFound { name: String, path: PathBuf },

    /// A path that must not exist already does.
    #[error("Path '{}' of parameter '{name}' already exists", path.display())]
    PathExists { name: String, path: PathBuf },

    /// The schema declares subcommands but no argument was given.
    #[error("No subcommand found")]
    NoSubcommand,

    /// The first argument names no declared subcommand.
    #[error("Unknown subcommand '{0}'")]
    UnknownSubcommand(String),

    /// The token is not shaped like `--key=value`.
    #[error("Parameter '{0}' has no valid --key=value structure")]
    MalformedToken(String),

    /// The key names no parameter of the active container.
    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),

    /// A mandatory parameter never received a value.
    #[error("Parameter '{0}' is missing")]
    Missing(String),
}

/// Errors raised by an invalid schema declaration.
///
/// Returned from the offending builder call (or collected by
/// [`validate_command`](crate::validate_command)); the container being
/// modified is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Command, subcommand or parameter name is empty or whitespace-only.
    #[error("name cannot be empty")]
    EmptyName,

    /// Name contains whitespace or `=`, or starts with `-`.
    #[error("invalid name: '{0}'")]
    InvalidName(String),

    /// Description is empty; it is required for help text.
    #[error("description of '{0}' cannot be empty")]
    EmptyDescription(String),

    /// Minimum bound is greater than the maximum (or a bound is NaN).
    #[error("invalid bounds for parameter '{name}': {min} > {max}")]
    InvalidBounds {
        name: String,
        min: String,
        max: String,
    },

    /// Default value does not satisfy the parameter's own constraints.
    #[error("invalid default value for parameter '{name}': {reason}")]
    InvalidDefault { name: String, reason: String },

    /// A command may hold parameters or subcommands, never both.
    #[error("command '{0}' cannot hold both parameters and subcommands")]
    MixedContainer(String),

    /// The same name was declared twice in a schema file.
    #[error("duplicate name in '{scope}': {name}")]
    DuplicateName { scope: String, name: String },
}
