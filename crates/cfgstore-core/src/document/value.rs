//! Configuration value node and its coercion rules.
//!
//! Coercions are deliberately lenient, matching the config API that plugin
//! authors already know from their host framework: a float read as an int is
//! truncated, a number read as a string is stringified, and anything that
//! cannot be coerced falls back to the caller's default instead of failing.

use super::section::ConfigSection;

/// A single node in a configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    /// A nested mapping addressed by further path segments.
    Section(ConfigSection),
}

impl ConfigValue {
    /// Short lowercase name of the variant, used in CLI error output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Section(_) => "section",
        }
    }

    /// Returns `true` for everything except lists and sections.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, ConfigValue::List(_) | ConfigValue::Section(_))
    }

    /// Numeric value as an integer.  Floats are truncated toward zero.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            // `as` saturates on overflow and maps NaN to 0.
            ConfigValue::Float(f) => Some(f.trunc() as i64),
            _ => None,
        }
    }

    /// Numeric value as a float.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            ConfigValue::Int(i) => Some(*i as f64),
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Only genuine booleans; the string `"true"` is not a bool scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Scalar value rendered as text.  Lists and sections have no string form.
    pub fn as_string(&self) -> Option<String> {
        match self {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Int(i) => Some(i.to_string()),
            ConfigValue::Float(f) => Some(format_float(*f)),
            ConfigValue::Bool(b) => Some(b.to_string()),
            ConfigValue::List(_) | ConfigValue::Section(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&ConfigSection> {
        match self {
            ConfigValue::Section(section) => Some(section),
            _ => None,
        }
    }

    // ── List element coercions ───────────────────────────────────────────────
    //
    // List elements are slightly more forgiving than scalars: quoted numbers
    // such as `- "5"` still count, because YAML authors frequently quote list
    // entries.

    pub(crate) fn int_element(&self) -> Option<i64> {
        match self {
            ConfigValue::String(s) => s.parse().ok(),
            other => other.as_int(),
        }
    }

    pub(crate) fn double_element(&self) -> Option<f64> {
        match self {
            ConfigValue::String(s) => s.parse().ok(),
            other => other.as_double(),
        }
    }

    pub(crate) fn bool_element(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            ConfigValue::String(s) if s == "true" => Some(true),
            ConfigValue::String(s) if s == "false" => Some(false),
            _ => None,
        }
    }

    pub(crate) fn string_element(&self) -> Option<String> {
        self.as_string()
    }
}

/// Renders a float so that whole numbers keep a trailing `.0` (`1.0`, not `1`).
fn format_float(f: f64) -> String {
    format!("{f:?}")
}

// ── Conversions ───────────────────────────────────────────────────────────────

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(i64::from(value))
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<ConfigSection> for ConfigValue {
    fn from(value: ConfigSection) -> Self {
        ConfigValue::Section(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(values: Vec<T>) -> Self {
        ConfigValue::List(values.into_iter().map(Into::into).collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
