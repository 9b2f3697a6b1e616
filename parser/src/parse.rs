//! Argument parsing against a [`Command`] schema.
//!
//! Arguments use the `--key=value` grammar. When the schema declares
//! subcommands, the first argument must name one of them; no flag may
//! precede it. Each parse works on copies of the schema's parameters, so a
//! single [`Parser`] can be reused (and shared across threads) freely.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use argschema_core::{
    Command, Parameter, ParameterContainer, ParameterError, SchemaError, Subcommand,
    validate_command,
};
use regex::Regex;
use tracing::debug;

use crate::config::ParserConfig;
use crate::error::UsageError;
use crate::help::HelpFormatter;
use crate::result::{ParsedCommand, ParsedSubcommand};

/// Two dashes, a key without `=`, then `=` and a non-empty value.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^--([^=]+)=(.+)$").expect("static regex must compile"));

/// Validates argument arrays against a schema.
///
/// # Examples
///
/// ```
/// use argschema_core::{Command, Parameter, Subcommand};
/// use argschema_parser::{ParsedValues, Parser};
///
/// let run = Subcommand::new("run", "Run the job.")
///     .with_parameter(Parameter::integer("count", "Repetitions.", 1, 10).unwrap());
/// let schema = Command::new("tool", "Example tool.").with_subcommand(run).unwrap();
/// let parser = Parser::new(schema).unwrap();
///
/// let parsed = parser.parse(["run", "--count=5"]).unwrap();
/// let run = parsed.subcommand().unwrap();
/// assert_eq!(run.integer_parameter("count").unwrap().value, 5);
///
/// let err = parser.parse(["run", "--count=11"]).unwrap_err();
/// assert!(err.usage().starts_with("Error: Value of parameter 'count' must not be greater than 10\n"));
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    command: Command,
    formatter: HelpFormatter,
}

impl Parser {
    /// Creates a parser with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] reported by [`validate_command`].
    pub fn new(command: Command) -> Result<Self, SchemaError> {
        Self::with_config(command, &ParserConfig::default())
    }

    /// Creates a parser with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] reported by [`validate_command`].
    pub fn with_config(command: Command, config: &ParserConfig) -> Result<Self, SchemaError> {
        if let Some(error) = validate_command(&command).into_iter().next() {
            return Err(error);
        }
        Ok(Self {
            command,
            formatter: HelpFormatter::new(config.help.width),
        })
    }

    /// The schema this parser validates against.
    pub fn schema(&self) -> &Command {
        &self.command
    }

    /// Root usage block without an error line, for `--help` style output.
    pub fn help(&self) -> String {
        self.formatter.help(&self.command)
    }

    /// Parses `args` (without the program name).
    ///
    /// Parameter order is irrelevant. A key given twice keeps the last
    /// value.
    ///
    /// # Errors
    ///
    /// Returns a [`UsageError`] holding the usage block for the failing
    /// scope: the resolved subcommand if there is one, else the root.
    pub fn parse<I, S>(&self, args: I) -> Result<ParsedCommand, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();

        if !self.command.has_subcommands() {
            let mut parameters = self.command.parameter_map().clone();
            resolve_parameters(&mut parameters, args).map_err(|e| self.usage_error(None, e))?;
            return Ok(ParsedCommand::new(self.command.name(), parameters, None));
        }

        let first = args
            .next()
            .ok_or_else(|| self.usage_error(None, ParameterError::NoSubcommand))?;
        let name = first.as_ref();
        let subcommand = self.command.subcommand(name).ok_or_else(|| {
            self.usage_error(None, ParameterError::UnknownSubcommand(name.to_string()))
        })?;
        debug!(command = self.command.name(), subcommand = name, "Resolved subcommand");

        let mut parameters = subcommand.parameter_map().clone();
        resolve_parameters(&mut parameters, args)
            .map_err(|e| self.usage_error(Some(subcommand), e))?;

        Ok(ParsedCommand::new(
            self.command.name(),
            BTreeMap::new(),
            Some(ParsedSubcommand::new(subcommand.name(), parameters)),
        ))
    }

    fn usage_error(&self, subcommand: Option<&Subcommand>, cause: ParameterError) -> UsageError {
        debug!(
            command = self.command.name(),
            subcommand = subcommand.map(|s| s.name()),
            error = %cause,
            "Argument validation failed"
        );
        let usage = self
            .formatter
            .usage(&self.command, subcommand, Some(&cause.to_string()));
        UsageError::new(usage, cause)
    }
}

/// Applies every token to the matching parameter copy, then checks that
/// each parameter ended up with a value.
fn resolve_parameters<I, S>(
    parameters: &mut BTreeMap<String, Parameter>,
    tokens: I,
) -> Result<(), ParameterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for token in tokens {
        let token = token.as_ref();
        let (key, value) = split_token(token)?;
        let parameter = parameters
            .get_mut(key)
            .ok_or_else(|| ParameterError::UnknownParameter(key.to_string()))?;
        parameter.set_value(value)?;
    }

    if let Some(missing) = parameters.values().find(|p| !p.is_set()) {
        return Err(ParameterError::Missing(missing.name().to_string()));
    }

    Ok(())
}

fn split_token(token: &str) -> Result<(&str, &str), ParameterError> {
    TOKEN_RE
        .captures(token)
        .and_then(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .ok_or_else(|| ParameterError::MalformedToken(token.to_string()))
}
