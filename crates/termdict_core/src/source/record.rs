//! Raw per-subject record parsing.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reasons a document is not a flat label-to-definition map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFormatError {
    InvalidJson(String),
    /// Top-level value is not an object; carries the JSON kind found.
    NotAnObject(&'static str),
    /// Value under `key` is not a string.
    NonStringValue { key: String },
}

impl Display for RecordFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(message) => write!(f, "invalid JSON: {message}"),
            Self::NotAnObject(kind) => write!(f, "expected a JSON object, found {kind}"),
            Self::NonStringValue { key } => {
                write!(f, "definition for `{key}` is not a string")
            }
        }
    }
}

impl Error for RecordFormatError {}

/// Ordered label-to-definition pairs for one subject.
///
/// Entry order follows key order in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecord {
    entries: Vec<(String, String)>,
}

impl SourceRecord {
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, definition)| (label.into(), definition.into()))
                .collect(),
        }
    }

    /// Parses a flat JSON object of string values.
    ///
    /// Duplicate keys keep the last value, matching JSON object semantics.
    pub fn from_json_str(text: &str) -> Result<Self, RecordFormatError> {
        Self::from_json_slice(text.as_bytes())
    }

    /// Parses raw bytes as received from a file or HTTP body.
    ///
    /// Invalid UTF-8 is reported as [`RecordFormatError::InvalidJson`].
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, RecordFormatError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|err| RecordFormatError::InvalidJson(err.to_string()))?;
        let map = match value {
            Value::Object(map) => map,
            other => return Err(RecordFormatError::NotAnObject(json_kind(&other))),
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            match value {
                Value::String(definition) => entries.push((key, definition)),
                _ => return Err(RecordFormatError::NonStringValue { key }),
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(String, String)> {
        self.entries
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
