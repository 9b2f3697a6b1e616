//! Argument validation and usage rendering for `argschema` schemas.
//!
//! Given a [`Command`](argschema_core::Command) schema, a [`Parser`]
//! validates an argument array and produces either a [`ParsedCommand`]
//! holding typed values or a [`UsageError`] whose message is a complete,
//! ready-to-print usage block.
//!
//! # Main entry points
//!
//! - [`Parser::parse`]: validate arguments in `--key=value` form.
//! - [`Parser::help`]: render the root usage block.
//! - [`HelpFormatter`]: the word-wrapping renderer behind both.
//! - [`load_schema`] / [`ParserConfig::load`]: read schemas and settings
//!   from JSON or YAML files.
//!
//! # Example
//!
//! ```
//! use argschema_core::{Command, Parameter, Subcommand};
//! use argschema_parser::{ParsedValues, Parser};
//!
//! let run = Subcommand::new("run", "Run the job.")
//!     .with_parameter(Parameter::integer("count", "Repetitions.", 1, 10).unwrap())
//!     .with_parameter(
//!         Parameter::string("label", "Run label.", Vec::<String>::new())
//!             .with_default_value("x")
//!             .unwrap(),
//!     );
//! let schema = Command::new("tool", "Example tool.").with_subcommand(run).unwrap();
//! let parser = Parser::new(schema).unwrap();
//!
//! let parsed = parser.parse(["run", "--count=5"]).unwrap();
//! let run = parsed.subcommand().unwrap();
//! assert_eq!(run.integer_parameter("count").unwrap().value, 5);
//! assert_eq!(run.string_parameter("label").unwrap().value, "x");
//!
//! let err = parser.parse(Vec::<String>::new()).unwrap_err();
//! assert!(err.usage().starts_with("Error: No subcommand found\n"));
//! ```

pub mod config;
pub mod error;
pub mod help;
pub mod parse;
pub mod result;

pub use config::{HelpConfig, ParserConfig, load_schema};
pub use error::{ConfigError, UsageError};
pub use help::{DEFAULT_WIDTH, HelpFormatter};
pub use parse::Parser;
pub use result::{ParameterValue, ParsedCommand, ParsedSubcommand, ParsedValues};
