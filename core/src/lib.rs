//! Schema model for command-line argument parsing.
//!
//! This crate defines the types a caller uses to declare what a CLI accepts:
//!
//! - [`Command`]: the schema root. Holds either subcommands or parameters.
//! - [`Subcommand`]: a named group of parameters selected by the first
//!   argument.
//! - [`Parameter`]: a typed value cell ([`ParameterKind`]: boolean, integer,
//!   double, string, path) with an optional default.
//!
//! Validation ([`validate_command`]) catches schema bugs such as empty
//! names or names that cannot be written as `--name=value`.
//!
//! Parsing lives in the `argschema-parser` crate; this crate never looks at
//! user arguments except through [`Parameter::set_value`].
//!
//! # Example
//!
//! ```
//! use argschema_core::*;
//!
//! let run = Subcommand::new("run", "Run the job")
//!     .with_parameter(Parameter::integer("count", "Repetitions", 1, 10).unwrap())
//!     .with_parameter(
//!         Parameter::string("label", "Run label", Vec::<String>::new())
//!             .with_default_value("x")
//!             .unwrap(),
//!     );
//! let schema = Command::new("tool", "Example tool")
//!     .with_subcommand(run)
//!     .unwrap();
//!
//! assert!(schema.subcommand("run").is_some());
//! assert!(validate_command(&schema).is_empty());
//! ```

mod container;
mod error;
mod parameter;
mod validate;

pub use container::{Command, ParameterContainer, Subcommand};
pub use error::{ParameterError, SchemaError};
pub use parameter::{Parameter, ParameterKind, Value};
pub use validate::validate_command;
