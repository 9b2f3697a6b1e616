//! Parse results.
//!
//! A [`ParsedCommand`] is built fresh by every successful
//! [`Parser::parse`](crate::Parser::parse) call from copies of the schema's
//! parameters, so nothing a parse writes ever reaches the schema.

use std::collections::BTreeMap;
use std::path::Path;

use argschema_core::{Parameter, Value};
use serde::{Serialize, Serializer};

/// Read-only view of one parsed parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterValue<'a, T> {
    pub name: &'a str,
    pub value: T,
}

fn typed<'a, T>(
    parameter: Option<&'a Parameter>,
    extract: impl FnOnce(&'a Value) -> Option<T>,
) -> Option<ParameterValue<'a, T>> {
    let parameter = parameter?;
    let value = extract(parameter.value()?)?;
    Some(ParameterValue {
        name: parameter.name(),
        value,
    })
}

/// Typed getters shared by [`ParsedCommand`] and [`ParsedSubcommand`].
///
/// Each getter returns `None` when the name is undeclared or declared with
/// a different type.
pub trait ParsedValues {
    /// The parsed copy of a declared parameter.
    fn parameter(&self, name: &str) -> Option<&Parameter>;

    fn boolean_parameter(&self, name: &str) -> Option<ParameterValue<'_, bool>> {
        typed(self.parameter(name), Value::as_bool)
    }

    fn integer_parameter(&self, name: &str) -> Option<ParameterValue<'_, i64>> {
        typed(self.parameter(name), Value::as_i64)
    }

    fn double_parameter(&self, name: &str) -> Option<ParameterValue<'_, f64>> {
        typed(self.parameter(name), Value::as_f64)
    }

    fn string_parameter(&self, name: &str) -> Option<ParameterValue<'_, &str>> {
        typed(self.parameter(name), Value::as_str)
    }

    fn path_parameter(&self, name: &str) -> Option<ParameterValue<'_, &Path>> {
        typed(self.parameter(name), Value::as_path)
    }
}

/// Serializes parameters as a `name -> value` map.
fn serialize_values<S: Serializer>(
    parameters: &BTreeMap<String, Parameter>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        parameters
            .iter()
            .filter_map(|(name, p)| p.value().map(|value| (name, value))),
    )
}

/// Values supplied for a resolved subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedSubcommand {
    name: String,
    #[serde(serialize_with = "serialize_values")]
    parameters: BTreeMap<String, Parameter>,
}

impl ParsedSubcommand {
    pub(crate) fn new(name: &str, parameters: BTreeMap<String, Parameter>) -> Self {
        Self {
            name: name.to_string(),
            parameters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ParsedValues for ParsedSubcommand {
    fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }
}

/// Result of one successful parse.
///
/// Holds the command's own parameters when the schema declares no
/// subcommands, or the resolved [`ParsedSubcommand`] otherwise.
///
/// # Examples
///
/// ```
/// use argschema_core::{Command, Parameter};
/// use argschema_parser::{ParsedValues, Parser};
///
/// let schema = Command::new("tool", "Example tool.")
///     .with_parameter(Parameter::boolean("flag", "A flag."))
///     .unwrap();
/// let parsed = Parser::new(schema).unwrap().parse(["--flag=true"]).unwrap();
///
/// assert_eq!(parsed.name(), "tool");
/// assert_eq!(parsed.boolean_parameter("flag").unwrap().value, true);
/// assert!(parsed.integer_parameter("flag").is_none());
/// assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"name":"tool","parameters":{"flag":true}}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCommand {
    name: String,
    #[serde(
        serialize_with = "serialize_values",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    parameters: BTreeMap<String, Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subcommand: Option<ParsedSubcommand>,
}

impl ParsedCommand {
    pub(crate) fn new(
        name: &str,
        parameters: BTreeMap<String, Parameter>,
        subcommand: Option<ParsedSubcommand>,
    ) -> Self {
        Self {
            name: name.to_string(),
            parameters,
            subcommand,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved subcommand, if the schema declares any.
    pub fn subcommand(&self) -> Option<&ParsedSubcommand> {
        self.subcommand.as_ref()
    }
}

impl ParsedValues for ParsedCommand {
    fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }
}
