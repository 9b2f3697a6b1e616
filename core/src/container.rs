//! Parameter containers: [`Subcommand`] and the root [`Command`].
//!
//! Both keep their children in [`BTreeMap`]s so every listing comes out
//! sorted by name, which keeps help text and error messages deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SchemaError;
use crate::parameter::Parameter;

/// Read access shared by [`Command`] and [`Subcommand`].
pub trait ParameterContainer {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Parameters keyed by name.
    fn parameter_map(&self) -> &BTreeMap<String, Parameter>;

    /// All parameters, sorted by name.
    fn parameters(&self) -> Vec<&Parameter> {
        self.parameter_map().values().collect()
    }

    fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameter_map().get(name)
    }

    /// Parameters without a default, sorted by name.
    fn mandatory_parameters(&self) -> Vec<&Parameter> {
        self.parameter_map()
            .values()
            .filter(|p| p.is_mandatory())
            .collect()
    }

    /// Parameters with a default, sorted by name.
    fn optional_parameters(&self) -> Vec<&Parameter> {
        self.parameter_map()
            .values()
            .filter(|p| !p.is_mandatory())
            .collect()
    }
}

fn insert_parameter(
    scope: &str,
    parameters: &mut BTreeMap<String, Parameter>,
    parameter: Parameter,
) -> Option<Parameter> {
    let replaced = parameters.insert(parameter.name().to_string(), parameter);
    if let Some(old) = &replaced {
        debug!(
            scope,
            parameter = old.name(),
            kind = old.kind().type_name(),
            "Replaced parameter with the same name"
        );
    }
    replaced
}

fn collect_unique<T>(
    scope: &str,
    items: Vec<T>,
    key: impl Fn(&T) -> &str,
) -> Result<BTreeMap<String, T>, SchemaError> {
    let mut map = BTreeMap::new();
    for item in items {
        let name = key(&item).to_string();
        if map.contains_key(&name) {
            return Err(SchemaError::DuplicateName {
                scope: scope.to_string(),
                name,
            });
        }
        map.insert(name, item);
    }
    Ok(map)
}

/// A named group of parameters selected by the first argument.
///
/// Adding a parameter under a name that is already taken replaces the old
/// one, whatever its kind.
///
/// # Examples
///
/// ```
/// use argschema_core::{Parameter, ParameterContainer, Subcommand};
///
/// let run = Subcommand::new("run", "Run the job")
///     .with_parameter(Parameter::integer("count", "Repetitions", 1, 10).unwrap())
///     .with_parameter(Parameter::boolean("dry", "Only print"));
///
/// let names: Vec<_> = run.parameters().iter().map(|p| p.name()).collect();
/// assert_eq!(names, ["count", "dry"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SubcommandRepr", into = "SubcommandRepr")]
pub struct Subcommand {
    name: String,
    description: String,
    parameters: BTreeMap<String, Parameter>,
}

impl Subcommand {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a parameter, returning the one it replaced, if any.
    pub fn add_parameter(&mut self, parameter: Parameter) -> Option<Parameter> {
        insert_parameter(&self.name, &mut self.parameters, parameter)
    }

    /// Builder form of [`add_parameter`](Subcommand::add_parameter).
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.add_parameter(parameter);
        self
    }
}

impl ParameterContainer for Subcommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameter_map(&self) -> &BTreeMap<String, Parameter> {
        &self.parameters
    }
}

#[derive(Serialize, Deserialize)]
struct SubcommandRepr {
    name: String,
    description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<Parameter>,
}

impl TryFrom<SubcommandRepr> for Subcommand {
    type Error = SchemaError;

    fn try_from(repr: SubcommandRepr) -> Result<Self, Self::Error> {
        let parameters = collect_unique(&repr.name, repr.parameters, |p| p.name())?;
        Ok(Self {
            name: repr.name,
            description: repr.description,
            parameters,
        })
    }
}

impl From<Subcommand> for SubcommandRepr {
    fn from(sub: Subcommand) -> Self {
        Self {
            name: sub.name,
            description: sub.description,
            parameters: sub.parameters.into_values().collect(),
        }
    }
}

/// The root of a schema.
///
/// A command holds either subcommands or parameters, never both. Whichever
/// kind is added first locks the command into that shape; the other `add`
/// then fails without changing anything.
///
/// # Examples
///
/// ```
/// use argschema_core::{Command, Parameter, SchemaError, Subcommand};
///
/// let mut tool = Command::new("tool", "Does things");
/// tool.add_subcommand(Subcommand::new("run", "Run it")).unwrap();
///
/// let err = tool.add_parameter(Parameter::boolean("verbose", "Talk more")).unwrap_err();
/// assert_eq!(err, SchemaError::MixedContainer("tool".into()));
/// assert!(tool.subcommand("run").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CommandRepr", into = "CommandRepr")]
pub struct Command {
    name: String,
    description: String,
    parameters: BTreeMap<String, Parameter>,
    subcommands: BTreeMap<String, Subcommand>,
}

impl Command {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: BTreeMap::new(),
            subcommands: BTreeMap::new(),
        }
    }

    /// Adds a parameter, returning the one it replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MixedContainer`] if the command already holds
    /// subcommands.
    pub fn add_parameter(&mut self, parameter: Parameter) -> Result<Option<Parameter>, SchemaError> {
        if !self.subcommands.is_empty() {
            return Err(SchemaError::MixedContainer(self.name.clone()));
        }
        Ok(insert_parameter(&self.name, &mut self.parameters, parameter))
    }

    /// Adds a subcommand, returning the one it replaced, if any.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MixedContainer`] if the command already holds
    /// parameters.
    pub fn add_subcommand(
        &mut self,
        subcommand: Subcommand,
    ) -> Result<Option<Subcommand>, SchemaError> {
        if !self.parameters.is_empty() {
            return Err(SchemaError::MixedContainer(self.name.clone()));
        }
        Ok(self
            .subcommands
            .insert(subcommand.name().to_string(), subcommand))
    }

    /// Builder form of [`add_parameter`](Command::add_parameter).
    pub fn with_parameter(mut self, parameter: Parameter) -> Result<Self, SchemaError> {
        self.add_parameter(parameter)?;
        Ok(self)
    }

    /// Builder form of [`add_subcommand`](Command::add_subcommand).
    pub fn with_subcommand(mut self, subcommand: Subcommand) -> Result<Self, SchemaError> {
        self.add_subcommand(subcommand)?;
        Ok(self)
    }

    pub fn has_subcommands(&self) -> bool {
        !self.subcommands.is_empty()
    }

    /// Looks up a subcommand by exact, case-sensitive name.
    pub fn subcommand(&self, name: &str) -> Option<&Subcommand> {
        self.subcommands.get(name)
    }

    /// All subcommands, sorted by name.
    pub fn subcommands(&self) -> Vec<&Subcommand> {
        self.subcommands.values().collect()
    }
}

impl ParameterContainer for Command {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameter_map(&self) -> &BTreeMap<String, Parameter> {
        &self.parameters
    }
}

#[derive(Serialize, Deserialize)]
struct CommandRepr {
    name: String,
    description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subcommands: Vec<Subcommand>,
}

impl TryFrom<CommandRepr> for Command {
    type Error = SchemaError;

    fn try_from(repr: CommandRepr) -> Result<Self, Self::Error> {
        if !repr.parameters.is_empty() && !repr.subcommands.is_empty() {
            return Err(SchemaError::MixedContainer(repr.name));
        }
        let parameters = collect_unique(&repr.name, repr.parameters, |p| p.name())?;
        let subcommands = collect_unique(&repr.name, repr.subcommands, |s| s.name())?;
        Ok(Self {
            name: repr.name,
            description: repr.description,
            parameters,
            subcommands,
        })
    }
}

impl From<Command> for CommandRepr {
    fn from(command: Command) -> Self {
        Self {
            name: command.name,
            description: command.description,
            parameters: command.parameters.into_values().collect(),
            subcommands: command.subcommands.into_values().collect(),
        }
    }
}
