//! Raw index documents.
//!
//! The index returns loosely-typed JSON whose shape varies by category, so
//! documents are kept as a field map and read through tolerant accessors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One matched entry, exactly as the index returned it under `_source`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDocument(Map<String, Value>);

impl RawDocument {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a document from a JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Textual form of a scalar attribute. Missing keys, `null`, blank strings,
    /// and nested objects all read as `None`. Arrays of scalars are joined with
    /// `", "`.
    pub fn text(&self, key: &str) -> Option<String> {
        let rendered = match self.0.get(key)? {
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
                parts.join(", ")
            }
            other => scalar_text(other)?,
        };

        if rendered.trim().is_empty() {
            None
        } else {
            Some(rendered)
        }
    }

    /// String items of a list attribute; non-list values read as empty.
    pub fn list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Array(items)) => string_items(items),
            _ => Vec::new(),
        }
    }

    /// Trait tags, accepting both `{"value": [...]}` and a bare array.
    pub fn traits(&self) -> Vec<String> {
        match self.0.get("traits") {
            Some(Value::Array(items)) => string_items(items),
            Some(Value::Object(inner)) => match inner.get("value") {
                Some(Value::Array(items)) => string_items(items),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Entry name; the one attribute a renderable document must carry.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// External id used to build the reference link.
    pub fn aon_id(&self) -> Option<String> {
        self.text("aonId")
    }

    /// Long-form description text, empty when absent.
    pub fn body_text(&self) -> &str {
        self.0.get("text").and_then(Value::as_str).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for RawDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(scalar_text)
        .filter(|s| !s.trim().is_empty())
        .collect()
}
