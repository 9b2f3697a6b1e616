//! Typed parameter cells.
//!
//! A [`Parameter`] pairs a name and description with a [`ParameterKind`]
//! (the closed set of supported value types and their constraints) and an
//! optional [`Value`]. In a schema the value is the declared default; in a
//! parse result it is whatever the user supplied.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ParameterError, SchemaError};

/// A converted parameter value.
///
/// Serialized untagged, so `true`, `5`, `0.5` and `"text"` map directly to
/// JSON/YAML scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Path(PathBuf),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Double(d) => write!(f, "{d}"),
            Value::String(s) => f.write_str(s),
            Value::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<PathBuf> for Value {
    fn from(value: PathBuf) -> Self {
        Value::Path(value)
    }
}

impl From<&Path> for Value {
    fn from(value: &Path) -> Self {
        Value::Path(value.to_path_buf())
    }
}

fn i64_min() -> i64 {
    i64::MIN
}

fn i64_max() -> i64 {
    i64::MAX
}

fn f64_min() -> f64 {
    f64::MIN
}

fn f64_max() -> f64 {
    f64::MAX
}

/// The value type of a parameter together with its constraints.
///
/// # Examples
///
/// ```
/// use argschema_core::ParameterKind;
///
/// let kind = ParameterKind::Integer { min: 0, max: 100 };
/// assert_eq!(kind.allowed_values(), "0 to 100");
/// assert_eq!(ParameterKind::Boolean.allowed_values(), "false|true");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParameterKind {
    /// `true` or `false`.
    Boolean,
    /// Whole number within inclusive bounds.
    Integer {
        #[serde(default = "i64_min")]
        min: i64,
        #[serde(default = "i64_max")]
        max: i64,
    },
    /// Finite decimal number within inclusive bounds.
    Double {
        #[serde(default = "f64_min")]
        min: f64,
        #[serde(default = "f64_max")]
        max: f64,
    },
    /// Free text, or one of `allowed` when that set is non-empty.
    String {
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        allowed: BTreeSet<String>,
    },
    /// Filesystem path that must (or must not) exist.
    Path {
        #[serde(default)]
        must_exist: bool,
    },
}

impl ParameterKind {
    /// Lowercase name of the value type.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterKind::Boolean => "boolean",
            ParameterKind::Integer { .. } => "integer",
            ParameterKind::Double { .. } => "double",
            ParameterKind::String { .. } => "string",
            ParameterKind::Path { .. } => "path",
        }
    }

    /// Renders the constraint for help text; empty when unconstrained.
    ///
    /// Numeric bounds left at the type's extreme are omitted, so a kind
    /// with only `min` set renders as `at least <min>`.
    pub fn allowed_values(&self) -> String {
        match self {
            ParameterKind::Boolean => "false|true".to_string(),
            ParameterKind::Integer { min, max } => {
                describe_range((*min > i64::MIN).then_some(min), (*max < i64::MAX).then_some(max))
            }
            ParameterKind::Double { min, max } => {
                describe_range((*min > f64::MIN).then_some(min), (*max < f64::MAX).then_some(max))
            }
            ParameterKind::String { allowed } => {
                allowed.iter().map(String::as_str).collect::<Vec<_>>().join("|")
            }
            ParameterKind::Path { .. } => String::new(),
        }
    }

    fn check_bounds(&self, name: &str) -> Result<(), SchemaError> {
        let inverted = match self {
            ParameterKind::Integer { min, max } => {
                (min > max).then(|| (min.to_string(), max.to_string()))
            }
            // NaN bounds never satisfy `min <= max`.
            ParameterKind::Double { min, max } => {
                (!(min <= max)).then(|| (min.to_string(), max.to_string()))
            }
            _ => None,
        };

        match inverted {
            Some((min, max)) => Err(SchemaError::InvalidBounds {
                name: name.to_string(),
                min,
                max,
            }),
            None => Ok(()),
        }
    }

    /// Converts a raw argument into a [`Value`] of this kind and checks it.
    ///
    /// Path values are resolved to an absolute, normalized path before the
    /// existence check.
    ///
    /// # Errors
    ///
    /// Returns the [`ParameterError`] describing the first violated rule.
    pub fn convert(&self, name: &str, raw: &str) -> Result<Value, ParameterError> {
        let blank = match self {
            ParameterKind::String { .. } => raw.is_empty(),
            _ => raw.trim().is_empty(),
        };
        if blank {
            return Err(ParameterError::EmptyValue {
                name: name.to_string(),
            });
        }

        let value = match self {
            ParameterKind::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Value::Boolean(true)
                } else if raw.eq_ignore_ascii_case("false") {
                    Value::Boolean(false)
                } else {
                    return Err(ParameterError::InvalidBoolean {
                        name: name.to_string(),
                        raw: raw.to_string(),
                    });
                }
            }
            ParameterKind::Integer { .. } => {
                let parsed = raw.parse::<i64>().map_err(|_| ParameterError::InvalidInteger {
                    name: name.to_string(),
                    raw: raw.to_string(),
                })?;
                Value::Integer(parsed)
            }
            ParameterKind::Double { .. } => {
                let parsed = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|d| d.is_finite())
                    .ok_or_else(|| ParameterError::InvalidDouble {
                        name: name.to_string(),
                        raw: raw.to_string(),
                    })?;
                Value::Double(parsed)
            }
            ParameterKind::String { .. } => Value::String(raw.to_string()),
            ParameterKind::Path { must_exist } => {
                let path = resolve_path(raw).map_err(|_| ParameterError::InvalidPath {
                    name: name.to_string(),
                    raw: raw.to_string(),
                })?;
                let exists = path.exists();
                debug!(parameter = name, path = %path.display(), exists, "Checked path parameter");
                match (*must_exist, exists) {
                    (true, false) => {
                        return Err(ParameterError::PathNotFound {
                            name: name.to_string(),
                            path,
                        });
                    }
                    (false, true) => {
                        return Err(ParameterError::PathExists {
                            name: name.to_string(),
                            path,
                        });
                    }
                    _ => Value::Path(path),
                }
            }
        };

        self.check(name, &value)?;
        Ok(value)
    }

    /// Checks range and allowed-set constraints of an already typed value.
    ///
    /// Filesystem existence is not checked here.
    fn check(&self, name: &str, value: &Value) -> Result<(), ParameterError> {
        match (self, value) {
            (ParameterKind::Integer { min, max }, Value::Integer(v)) => {
                check_range(name, v, min, max)
            }
            (ParameterKind::Double { min, max }, Value::Double(v)) => {
                check_range(name, v, min, max)
            }
            (ParameterKind::String { allowed }, Value::String(s)) => {
                if allowed.is_empty() || allowed.contains(s) {
                    Ok(())
                } else {
                    Err(ParameterError::NotAllowed {
                        name: name.to_string(),
                        raw: s.clone(),
                        allowed: self.allowed_values(),
                    })
                }
            }
            _ => Ok(()),
        }
    }

    /// Matches a value against this kind, widening where lossless
    /// (integer to double, string to path).
    fn coerce(&self, value: Value) -> Option<Value> {
        match (self, value) {
            (ParameterKind::Boolean, v @ Value::Boolean(_)) => Some(v),
            (ParameterKind::Integer { .. }, v @ Value::Integer(_)) => Some(v),
            (ParameterKind::Double { .. }, v @ Value::Double(_)) => Some(v),
            (ParameterKind::Double { .. }, Value::Integer(i)) => Some(Value::Double(i as f64)),
            (ParameterKind::String { .. }, v @ Value::String(_)) => Some(v),
            (ParameterKind::Path { .. }, v @ Value::Path(_)) => Some(v),
            (ParameterKind::Path { .. }, Value::String(s)) => Some(Value::Path(PathBuf::from(s))),
            _ => None,
        }
    }
}

fn describe_range<T: fmt::Display>(min: Option<T>, max: Option<T>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{min} to {max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("at most {max}"),
        (None, None) => String::new(),
    }
}

fn check_range<T>(name: &str, value: &T, min: &T, max: &T) -> Result<(), ParameterError>
where
    T: PartialOrd + fmt::Display,
{
    if value < min {
        return Err(ParameterError::TooSmall {
            name: name.to_string(),
            min: min.to_string(),
        });
    }
    if value > max {
        return Err(ParameterError::TooLarge {
            name: name.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}

/// Resolves `raw` against the working directory and folds `.` and `..`
/// components lexically.
fn resolve_path(raw: impl AsRef<Path>) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(raw)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// A named, typed parameter.
///
/// Parameters start out mandatory. Giving one a default through
/// [`with_default_value`](Parameter::with_default_value) makes it optional.
/// Cloning yields a fully independent copy, which is how a parse result
/// gets its own cells without touching the schema.
///
/// # Examples
///
/// ```
/// use argschema_core::{Parameter, Value};
///
/// let mut count = Parameter::integer("count", "How many times to run", 1, 10).unwrap();
/// assert!(count.is_mandatory());
/// assert!(count.value().is_none());
///
/// count.set_value("5").unwrap();
/// assert_eq!(count.value(), Some(&Value::Integer(5)));
/// assert!(count.set_value("11").is_err());
///
/// let label = Parameter::string("label", "Run label", Vec::<String>::new())
///     .with_default_value("x")
///     .unwrap();
/// assert!(!label.is_mandatory());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterRepr", into = "ParameterRepr")]
pub struct Parameter {
    name: String,
    description: String,
    kind: ParameterKind,
    value: Option<Value>,
    mandatory: bool,
}

impl Parameter {
    fn with_kind(name: impl Into<String>, description: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            value: None,
            mandatory: true,
        }
    }

    /// Creates a boolean parameter accepting `true` or `false`.
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_kind(name, description, ParameterKind::Boolean)
    }

    /// Creates an integer parameter with inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidBounds`] if `min > max`.
    pub fn integer(
        name: impl Into<String>,
        description: impl Into<String>,
        min: i64,
        max: i64,
    ) -> Result<Self, SchemaError> {
        let parameter = Self::with_kind(name, description, ParameterKind::Integer { min, max });
        parameter.kind.check_bounds(&parameter.name)?;
        Ok(parameter)
    }

    /// Creates a decimal parameter with inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidBounds`] if `min > max` or either bound
    /// is NaN.
    pub fn double(
        name: impl Into<String>,
        description: impl Into<String>,
        min: f64,
        max: f64,
    ) -> Result<Self, SchemaError> {
        let parameter = Self::with_kind(name, description, ParameterKind::Double { min, max });
        parameter.kind.check_bounds(&parameter.name)?;
        Ok(parameter)
    }

    /// Creates a string parameter. An empty `allowed` set accepts any
    /// non-empty string.
    pub fn string<I, S>(name: impl Into<String>, description: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed = allowed.into_iter().map(Into::into).collect();
        Self::with_kind(name, description, ParameterKind::String { allowed })
    }

    /// Creates a path parameter. With `must_exist` the path has to exist,
    /// without it the path must not exist yet.
    pub fn path(name: impl Into<String>, description: impl Into<String>, must_exist: bool) -> Self {
        Self::with_kind(name, description, ParameterKind::Path { must_exist })
    }

    /// Assigns a default value and marks the parameter optional.
    ///
    /// The default goes through the same type, range and allowed-set checks
    /// as a parsed value. Path defaults are resolved like parsed paths but
    /// not checked against the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidDefault`] if the value has the wrong
    /// type or violates the parameter's constraints.
    pub fn with_default_value(mut self, value: impl Into<Value>) -> Result<Self, SchemaError> {
        let value = self.kind.coerce(value.into()).ok_or_else(|| SchemaError::InvalidDefault {
            name: self.name.clone(),
            reason: format!("expected a {} value", self.kind.type_name()),
        })?;
        let value = match value {
            Value::Path(path) => {
                let resolved = resolve_path(&path).map_err(|e| SchemaError::InvalidDefault {
                    name: self.name.clone(),
                    reason: e.to_string(),
                })?;
                Value::Path(resolved)
            }
            other => other,
        };
        self.kind
            .check(&self.name, &value)
            .map_err(|e| SchemaError::InvalidDefault {
                name: self.name.clone(),
                reason: e.to_string(),
            })?;

        self.value = Some(value);
        self.mandatory = false;
        Ok(self)
    }

    /// Validates and converts `raw`, storing the result on success.
    ///
    /// On failure the previous value is kept.
    ///
    /// # Errors
    ///
    /// See [`ParameterKind::convert`].
    pub fn set_value(&mut self, raw: &str) -> Result<(), ParameterError> {
        let value = self.kind.convert(&self.name, raw)?;
        debug!(parameter = %self.name, value = %value, "Parameter value set");
        self.value = Some(value);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &ParameterKind {
        &self.kind
    }

    /// Current value: the default in a schema, the parsed value in a result.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// `true` when no default was declared.
    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    /// `true` once a default or a parsed value is present.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// See [`ParameterKind::allowed_values`].
    pub fn allowed_values(&self) -> String {
        self.kind.allowed_values()
    }
}

/// On-disk shape of a [`Parameter`]: the kind's fields are flattened next to
/// the name and an optional `default`.
#[derive(Serialize, Deserialize)]
struct ParameterRepr {
    name: String,
    description: String,
    #[serde(flatten)]
    kind: ParameterKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
}

impl TryFrom<ParameterRepr> for Parameter {
    type Error = SchemaError;

    fn try_from(repr: ParameterRepr) -> Result<Self, Self::Error> {
        let parameter = Parameter::with_kind(repr.name, repr.description, repr.kind);
        parameter.kind.check_bounds(&parameter.name)?;
        match repr.default {
            Some(default) => parameter.with_default_value(default),
            None => Ok(parameter),
        }
    }
}

impl From<Parameter> for ParameterRepr {
    fn from(parameter: Parameter) -> Self {
        let default = if parameter.mandatory {
            None
        } else {
            parameter.value
        };
        Self {
            name: parameter.name,
            description: parameter.description,
            kind: parameter.kind,
            default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_bounds_are_inclusive() {
        let mut param = Parameter::integer("count", "Count", 1, 10).unwrap();

        assert!(param.set_value("1").is_ok());
        assert!(param.set_value("10").is_ok());
        assert_eq!(
            param.set_value("0"),
            Err(ParameterError::TooSmall {
                name: "count".into(),
                min: "1".into()
            })
        );
        assert_eq!(
            param.set_value("11"),
            Err(ParameterError::TooLarge {
                name: "count".into(),
                max: "10".into()
            })
        );
        // A failed set keeps the last good value.
        assert_eq!(param.value(), Some(&Value::Integer(10)));
    }

    #[test]
    fn test_inverted_bounds_are_rejected() {
        assert!(matches!(
            Parameter::integer("count", "Count", 5, 1),
            Err(SchemaError::InvalidBounds { .. })
        ));
        assert!(matches!(
            Parameter::double("ratio", "Ratio", 1.0, 0.5),
            Err(SchemaError::InvalidBounds { .. })
        ));
        assert!(matches!(
            Parameter::double("ratio", "Ratio", f64::NAN, 0.5),
            Err(SchemaError::InvalidBounds { .. })
        ));
        assert!(Parameter::integer("count", "Count", 3, 3).is_ok());
    }

    #[test]
    fn test_non_numeric_values_fail() {
        let mut int = Parameter::integer("count", "Count", 0, 100).unwrap();
        assert!(matches!(
            int.set_value("five"),
            Err(ParameterError::InvalidInteger { .. })
        ));
        assert!(matches!(
            int.set_value("1.5"),
            Err(ParameterError::InvalidInteger { .. })
        ));

        let mut double = Parameter::double("ratio", "Ratio", 0.0, 1.0).unwrap();
        assert!(double.set_value("0.25").is_ok());
        assert_eq!(double.value(), Some(&Value::Double(0.25)));
        assert!(matches!(
            double.set_value("NaN"),
            Err(ParameterError::InvalidDouble { .. })
        ));
        assert!(matches!(
            double.set_value("1.5"),
            Err(ParameterError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_boolean_values() {
        let mut flag = Parameter::boolean("flag", "A flag");
        assert!(flag.set_value("true").is_ok());
        assert_eq!(flag.value(), Some(&Value::Boolean(true)));
        assert!(flag.set_value("FALSE").is_ok());
        assert_eq!(flag.value(), Some(&Value::Boolean(false)));

        let err = flag.set_value("maybe").unwrap_err();
        assert!(err.to_string().contains("boolean"));
    }

    #[test]
    fn test_empty_values() {
        let mut flag = Parameter::boolean("flag", "A flag");
        assert!(matches!(
            flag.set_value("  "),
            Err(ParameterError::EmptyValue { .. })
        ));

        let mut text = Parameter::string("text", "Text", Vec::<String>::new());
        assert!(matches!(
            text.set_value(""),
            Err(ParameterError::EmptyValue { .. })
        ));
        // Strings keep whitespace as-is.
        assert!(text.set_value("  ").is_ok());
        assert_eq!(text.value(), Some(&Value::String("  ".into())));
    }

    #[test]
    fn test_string_allowed_values() {
        let mut mode = Parameter::string("mode", "Mode", ["fast", "slow"]);
        assert!(mode.set_value("fast").is_ok());

        let err = mode.set_value("medium").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Value 'medium' of parameter 'mode' is not one of fast|slow"
        );
    }

    #[test]
    fn test_allowed_values_rendering() {
        assert_eq!(
            Parameter::integer("n", "N", 0, 100).unwrap().allowed_values(),
            "0 to 100"
        );
        assert_eq!(
            Parameter::double("r", "R", 0.5, 2.0).unwrap().allowed_values(),
            "0.5 to 2"
        );
        assert_eq!(
            Parameter::string("s", "S", ["c", "a", "b"]).allowed_values(),
            "a|b|c"
        );
        assert_eq!(Parameter::boolean("b", "B").allowed_values(), "false|true");
        assert_eq!(
            Parameter::string("s", "S", Vec::<String>::new()).allowed_values(),
            ""
        );
        assert_eq!(Parameter::path("p", "P", true).allowed_values(), "");
        assert_eq!(
            Parameter::integer("n", "N", i64::MIN, i64::MAX)
                .unwrap()
                .allowed_values(),
            ""
        );
    }

    #[test]
    fn test_one_sided_bounds_rendering() {
        assert_eq!(
            Parameter::integer("n", "N", 0, i64::MAX).unwrap().allowed_values(),
            "at least 0"
        );
        assert_eq!(
            Parameter::integer("n", "N", i64::MIN, 10).unwrap().allowed_values(),
            "at most 10"
        );
        assert_eq!(
            Parameter::double("r", "R", f64::MIN, 2.5).unwrap().allowed_values(),
            "at most 2.5"
        );

        // Omitted bounds in a schema file fall back to the extremes.
        let json = r#"{"name": "ratio", "description": "Ratio", "type": "double", "min": 0}"#;
        let param: Parameter = serde_json::from_str(json).unwrap();
        assert_eq!(param.allowed_values(), "at least 0");

        let json = r#"{"name": "ratio", "description": "Ratio", "type": "double"}"#;
        let param: Parameter = serde_json::from_str(json).unwrap();
        assert_eq!(param.allowed_values(), "");
    }

    #[test]
    fn test_surrounding_whitespace_is_not_trimmed() {
        let mut count = Parameter::integer("count", "Count", 0, 10).unwrap();
        assert!(matches!(
            count.set_value(" 5"),
            Err(ParameterError::InvalidInteger { .. })
        ));
        assert!(count.value().is_none());

        let mut ratio = Parameter::double("ratio", "Ratio", 0.0, 1.0).unwrap();
        assert!(matches!(
            ratio.set_value("0.5 "),
            Err(ParameterError::InvalidDouble { .. })
        ));

        let mut flag = Parameter::boolean("flag", "A flag");
        assert!(matches!(
            flag.set_value(" true"),
            Err(ParameterError::InvalidBoolean { .. })
        ));
    }

    #[test]
    fn test_path_existence() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("present.txt");
        std::fs::write(&existing, "data").unwrap();
        let missing = dir.path().join("absent.txt");

        let mut input = Parameter::path("input", "Input file", true);
        assert!(input.set_value(existing.to_str().unwrap()).is_ok());
        assert!(matches!(
            input.set_value(missing.to_str().unwrap()),
            Err(ParameterError::PathNotFound { .. })
        ));

        let mut output = Parameter::path("output", "Output file", false);
        assert!(output.set_value(missing.to_str().unwrap()).is_ok());
        assert!(matches!(
            output.set_value(existing.to_str().unwrap()),
            Err(ParameterError::PathExists { .. })
        ));
    }

    #[test]
    fn test_path_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("present.txt");
        std::fs::write(&existing, "data").unwrap();
        let indirect = dir.path().join("sub").join("..").join(".").join("present.txt");

        let mut input = Parameter::path("input", "Input file", true);
        input.set_value(indirect.to_str().unwrap()).unwrap();

        let stored = input.value().and_then(Value::as_path).unwrap();
        assert!(stored.is_absolute());
        assert_eq!(stored.file_name().unwrap(), "present.txt");
        assert!(!stored.components().any(|c| matches!(c, Component::ParentDir | Component::CurDir)));
    }

    #[test]
    fn test_default_values_are_validated() {
        let label = Parameter::string("label", "Label", ["x", "y"])
            .with_default_value("x")
            .unwrap();
        assert!(!label.is_mandatory());
        assert!(label.is_set());

        assert!(matches!(
            Parameter::string("label", "Label", ["x", "y"]).with_default_value("z"),
            Err(SchemaError::InvalidDefault { .. })
        ));
        assert!(matches!(
            Parameter::integer("count", "Count", 1, 10)
                .unwrap()
                .with_default_value(11),
            Err(SchemaError::InvalidDefault { .. })
        ));
        assert!(matches!(
            Parameter::integer("count", "Count", 1, 10)
                .unwrap()
                .with_default_value("five"),
            Err(SchemaError::InvalidDefault { .. })
        ));

        let ratio = Parameter::double("ratio", "Ratio", 0.0, 10.0)
            .unwrap()
            .with_default_value(2)
            .unwrap();
        assert_eq!(ratio.value(), Some(&Value::Double(2.0)));
    }

    #[test]
    fn test_path_default_is_resolved() {
        let output = Parameter::path("output", "Output file", false)
            .with_default_value("rel/../out.txt")
            .unwrap();

        let stored = output.value().and_then(Value::as_path).unwrap();
        assert!(stored.is_absolute());
        assert!(stored.ends_with("out.txt"));
        assert!(!stored.components().any(|c| matches!(c, Component::ParentDir | Component::CurDir)));
        assert_eq!(stored, std::path::absolute("out.txt").unwrap());

        // No existence check for defaults.
        let input = Parameter::path("input", "Input file", true)
            .with_default_value("no/such/file.txt")
            .unwrap();
        assert!(input.value().and_then(Value::as_path).unwrap().is_absolute());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Parameter::integer("count", "Count", 1, 10)
            .unwrap()
            .with_default_value(3)
            .unwrap();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_value("7").unwrap();
        assert_eq!(copy.value(), Some(&Value::Integer(7)));
        assert_eq!(original.value(), Some(&Value::Integer(3)));
        assert_eq!(copy.name(), original.name());
        assert_eq!(copy.kind(), original.kind());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "name": "ratio",
            "description": "Sampling ratio",
            "type": "double",
            "min": 0,
            "max": 1,
            "default": 1
        }"#;
        let param: Parameter = serde_json::from_str(json).unwrap();
        assert_eq!(param.kind(), &ParameterKind::Double { min: 0.0, max: 1.0 });
        assert_eq!(param.value(), Some(&Value::Double(1.0)));
        assert!(!param.is_mandatory());

        let bad = r#"{"name": "n", "description": "N", "type": "integer", "min": 9, "max": 1}"#;
        assert!(serde_json::from_str::<Parameter>(bad).is_err());
    }
}
