//! Column → custom attribute mapping

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{ATTRIBUTE_DEFINITIONS, DATE_COLUMN_HINTS};

/// Numeric id of a custom attribute definition in the target project.
pub type AttributeId = i64;

/// Fixed mapping from recognised dataset column names to attribute ids.
///
/// Constructed once at startup and shared by reference; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSchema {
    by_column: HashMap<String, AttributeId>,
}

impl AttributeSchema {
    /// Schema for an arbitrary set of definitions.
    pub fn new<I, S>(definitions: I) -> Self
    where
        I: IntoIterator<Item = (S, AttributeId)>,
        S: Into<String>,
    {
        Self { by_column: definitions.into_iter().map(|(name, id)| (name.into(), id)).collect() }
    }

    /// The nine attribute definitions configured on the project.
    pub fn project_default() -> Self {
        Self::new(ATTRIBUTE_DEFINITIONS)
    }

    pub fn attribute_id(&self, column: &str) -> Option<AttributeId> {
        self.by_column.get(column).copied()
    }

    pub fn contains_id(&self, id: AttributeId) -> bool {
        self.by_column.values().any(|known| *known == id)
    }

    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }
}

impl Default for AttributeSchema {
    fn default() -> Self {
        Self::project_default()
    }
}

/// Whether values of `column` are dates (name contains `start` or `end`,
/// case-insensitive).
pub fn is_date_column(column: &str) -> bool {
    let lower = column.to_lowercase();
    DATE_COLUMN_HINTS.iter().any(|hint| lower.contains(hint))
}
