//! Custom attribute update payloads

use serde::{Deserialize, Serialize};

use super::schema::AttributeId;

/// One attribute assignment, serialised as `{"id": 7374741, "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: AttributeId,
    pub value: String,
}

/// Ordered attribute assignments for one document version.
///
/// Never holds two entries with the same id, and never holds an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct UpdatePayload {
    entries: Vec<AttributeValue>,
}

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assignment. Returns `false` (and leaves the payload as is)
    /// when `value` is empty or `id` is already present.
    pub fn push(&mut self, id: AttributeId, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() || self.contains(id) {
            return false;
        }
        self.entries.push(AttributeValue { id, value });
        true
    }

    pub fn contains(&self, id: AttributeId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn get(&self, id: AttributeId) -> Option<&str> {
        self.entries.iter().find(|entry| entry.id == id).map(|entry| entry.value.as_str())
    }

    pub fn entries(&self) -> &[AttributeValue] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
