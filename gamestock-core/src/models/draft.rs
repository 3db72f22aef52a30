use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use super::kind::EntityKind;

/// Errors converting a draft into a wire payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Field '{field}' has invalid value '{value}'")]
    InvalidValue { field: String, value: String },
    #[error("Failed to encode payload: {0}")]
    Encode(String),
}

pub(crate) fn encode<T: Serialize>(payload: &T) -> Result<serde_json::Value, DraftError> {
    serde_json::to_value(payload).map_err(|e| DraftError::Encode(e.to_string()))
}

/// An in-progress, unconfirmed set of editable field values.
///
/// Values are held as entered text; typing happens when the draft is turned
/// into a payload, after validation has passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    fields: BTreeMap<String, String>,
}

impl Draft {
    /// Creates a draft with every editable field of `kind` set to empty.
    pub fn empty(kind: EntityKind) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|name| (name.to_string(), String::new()))
            .collect();
        Self { fields }
    }

    /// Returns the value of a field, or `""` if it has never been set.
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Trimmed value of a field.
    pub(crate) fn text(&self, name: &str) -> String {
        self.get(name).trim().to_string()
    }

    pub(crate) fn parse<T: std::str::FromStr>(&self, name: &str) -> Result<T, DraftError> {
        let raw = self.get(name).trim();
        raw.parse().map_err(|_| DraftError::InvalidValue {
            field: name.to_string(),
            value: raw.to_string(),
        })
    }
}
