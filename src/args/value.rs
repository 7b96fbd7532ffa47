//! Parsed argument values.

use std::collections::BTreeMap;

use serde::Serialize;

/// Reserved key holding the positional tokens in the JSON view of [`ParsedArgs`].
pub const POSITIONAL_KEY: &str = "_";

/// A typed flag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    String(String),
    Bool(bool),
    Number(f64),
    /// A flag given more than once.
    List(Vec<ArgValue>),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ArgValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Append `other`, turning a scalar into a list on the first repeat.
    pub(crate) fn accumulate(self, other: ArgValue) -> ArgValue {
        match self {
            ArgValue::List(mut items) => {
                items.push(other);
                ArgValue::List(items)
            }
            scalar => ArgValue::List(vec![scalar, other]),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Number(value)
    }
}

/// Result of applying an option schema to raw arguments.
///
/// Holds the ordered positional tokens plus every flag that was seen (or
/// defaulted), keyed by option name and each of its aliases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedArgs {
    positional: Vec<String>,
    values: BTreeMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positional tokens in order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Replace the positional tokens (used after command resolution).
    pub fn set_positional(&mut self, positional: Vec<String>) {
        self.positional = positional;
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ArgValue::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ArgValue::as_bool)
    }

    pub fn get_number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ArgValue::as_number)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Flag names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    pub(crate) fn push_positional(&mut self, token: String) {
        self.positional.push(token);
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<ArgValue> {
        self.values.remove(name)
    }

    /// JSON view: every flag plus the positional tokens under `_`.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert(
            POSITIONAL_KEY.to_string(),
            serde_json::Value::from(self.positional.clone()),
        );
        for (name, value) in &self.values {
            map.insert(
                name.clone(),
                serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
            );
        }
        serde_json::Value::Object(map)
    }
}
