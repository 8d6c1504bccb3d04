//! YAML parsing and rendering for configuration documents.
//!
//! `serde_yaml` does the tokenising; this module maps its generic
//! [`serde_yaml::Value`] tree onto [`ConfigSection`] / [`ConfigValue`]:
//!
//! - `null` entries are dropped, so `key: ~` behaves like a missing key.
//! - Non-string scalar keys (`1: one`, `true: yes`) are stringified.
//! - Tagged values (`!custom 5`) are unwrapped to their inner value.
//! - A top-level value that is not a mapping is rejected.
//!
//! Rendering goes the other way through the `Serialize` impls below, which
//! also power [`ConfigSection::deserialize_into`].

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::warn;

use super::section::ConfigSection;
use super::value::ConfigValue;

/// Error type for document parsing, rendering, and typed conversion.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not valid YAML.
    #[error("failed to parse YAML document: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// The YAML is valid but its top level is a scalar or a list.
    #[error("top level of the document is not a mapping (found {found})")]
    NotAMapping { found: &'static str },

    /// The document could not be rendered as YAML.
    #[error("failed to render document as YAML: {0}")]
    Serialize(#[source] serde_yaml::Error),

    /// A section or value does not match the requested Rust type.
    #[error("failed to convert value: {0}")]
    Convert(#[source] serde_yaml::Error),
}

/// Parses YAML text into a root section.
///
/// Blank input yields an empty section.
///
/// # Errors
///
/// Returns [`DocumentError::Parse`] for malformed YAML and
/// [`DocumentError::NotAMapping`] when the top level is not a mapping.
pub fn parse_document(text: &str) -> Result<ConfigSection, DocumentError> {
    if text.trim().is_empty() {
        return Ok(ConfigSection::new());
    }
    let value: Value = serde_yaml::from_str(text).map_err(DocumentError::Parse)?;
    root_section(value)
}

/// Renders a section as YAML text.
///
/// # Errors
///
/// Returns [`DocumentError::Serialize`] if the emitter fails.
pub fn to_yaml_string(section: &ConfigSection) -> Result<String, DocumentError> {
    serde_yaml::to_string(section).map_err(DocumentError::Serialize)
}

impl FromStr for ConfigSection {
    type Err = DocumentError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_document(text)
    }
}

impl ConfigSection {
    /// Converts this section into any deserialisable Rust type.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Convert`] when the shape does not match `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, DocumentError> {
        let value = serde_yaml::to_value(self).map_err(DocumentError::Serialize)?;
        serde_yaml::from_value(value).map_err(DocumentError::Convert)
    }
}

impl ConfigValue {
    /// Converts this value into any deserialisable Rust type.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Convert`] when the shape does not match `T`.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, DocumentError> {
        let value = serde_yaml::to_value(self).map_err(DocumentError::Serialize)?;
        serde_yaml::from_value(value).map_err(DocumentError::Convert)
    }
}

// ── serde_yaml::Value → document ──────────────────────────────────────────────

fn root_section(value: Value) -> Result<ConfigSection, DocumentError> {
    match value {
        Value::Null => Ok(ConfigSection::new()),
        Value::Mapping(mapping) => Ok(section_from_mapping(mapping)),
        Value::Tagged(tagged) => root_section(tagged.value),
        other => Err(DocumentError::NotAMapping {
            found: yaml_kind(&other),
        }),
    }
}

fn section_from_mapping(mapping: Mapping) -> ConfigSection {
    let mut section = ConfigSection::new();
    for (key, value) in mapping {
        let key = match key {
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            other => {
                warn!("skipping entry with unsupported {} key", yaml_kind(&other));
                continue;
            }
        };
        if let Some(value) = convert(value) {
            section.insert(key, value);
        }
    }
    section
}

fn convert(value: Value) -> Option<ConfigValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(ConfigValue::Bool(b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(ConfigValue::Int(i)),
            // u64 beyond i64::MAX and real floats both land here.
            None => n.as_f64().map(ConfigValue::Float),
        },
        Value::String(s) => Some(ConfigValue::String(s)),
        Value::Sequence(items) => Some(ConfigValue::List(
            items.into_iter().filter_map(convert).collect(),
        )),
        Value::Mapping(mapping) => Some(ConfigValue::Section(section_from_mapping(mapping))),
        Value::Tagged(tagged) => convert(tagged.value),
    }
}

fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

// ── document → serde ──────────────────────────────────────────────────────────

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Int(i) => serializer.serialize_i64(*i),
            ConfigValue::Float(f) => serializer.serialize_f64(*f),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::List(items) => serializer.collect_seq(items),
            ConfigValue::Section(section) => section.serialize(serializer),
        }
    }
}

impl Serialize for ConfigSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
