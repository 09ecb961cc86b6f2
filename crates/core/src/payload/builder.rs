//! Update payload construction
//!
//! Turns a matched dataset row into the attribute assignments for one
//! document. Only columns known to the [`AttributeSchema`] contribute; date
//! columns are normalised, other values are sent as trimmed text, and blank
//! or unparseable values are left out entirely.

use attrsync_domain::{is_date_column, AttributeRow, AttributeSchema, CellValue, UpdatePayload};
use tracing::debug;

use super::dates::normalize_date;

/// Build the update payload for `row`, in dataset column order.
pub fn build_payload(row: &AttributeRow, schema: &AttributeSchema) -> UpdatePayload {
    let mut payload = UpdatePayload::new();

    for (column, value) in row.cells() {
        let Some(attribute_id) = schema.attribute_id(column) else {
            continue;
        };

        match normalize_value(column, value) {
            Some(normalized) => {
                payload.push(attribute_id, normalized);
            }
            None if !value.is_blank() => {
                debug!(column, "Dropping attribute with unparseable date value");
            }
            None => {}
        }
    }

    payload
}

fn normalize_value(column: &str, value: &CellValue) -> Option<String> {
    if is_date_column(column) {
        normalize_date(value)
    } else {
        value.as_text()
    }
}
