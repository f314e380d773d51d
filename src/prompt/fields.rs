//! Runtime-supplied prompt fragments

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known field names consumed by the built-in strategies
pub const HISTORY: &str = "history";
pub const RESPONSE_FORMAT_RULES: &str = "response_format_rules";
pub const VALID_ACTIONS_LIST: &str = "valid_actions_list";
pub const EXAMPLE: &str = "example";

/// Named text fragments passed to `build`. Strategies pick the names they
/// know and ignore the rest; a present field is used even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeFields(IndexMap<String, String>);

impl RuntimeFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a `name=value` assignment; the value may contain further `=`
    pub fn parse_assignment(assignment: &str) -> Result<(String, String), String> {
        match assignment.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.to_string())),
            _ => Err(format!("Expected name=value, got: {}", assignment)),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuntimeFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
