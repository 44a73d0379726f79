use indexmap::IndexMap;

use crate::model::{RawTable, SyllabusRecord};
use crate::text::{clean_cell, collapse_whitespace, normalize_key};

const FIRST_ROW_KEYS: [(usize, &str); 3] = [
    (1, "discipline"),
    (2, "credit_load"),
    (3, "weekly_classes"),
];

/// Turns a two-column syllabus table (`key:` | value) into a flat mapping.
///
/// A value that spills over several rows arrives with an empty key cell and
/// is appended to the previous key. The record is only kept when it carries a
/// non-empty `ementa`.
#[must_use]
pub fn parse_syllabus(table: &RawTable) -> Option<SyllabusRecord> {
    if table.is_empty() || table.width() < 2 {
        return None;
    }

    let mut fields: IndexMap<String, String> = IndexMap::new();
    for (col, key) in FIRST_ROW_KEYS {
        if let Some(value) = clean_cell(table.cell(0, col)) {
            fields.insert(key.to_string(), value);
        }
    }

    let mut current_key: Option<String> = None;
    for row in 1..table.height() {
        let key_cell = clean_cell(table.cell(row, 0));
        let value_cell = clean_cell(table.cell(row, 1));

        if let Some(key_cell) = key_cell {
            let key = normalize_key(&key_cell);
            if key.is_empty() {
                current_key = None;
                continue;
            }
            fields.insert(key.clone(), value_cell.unwrap_or_default());
            current_key = Some(key);
        } else if let (Some(key), Some(value)) = (current_key.as_ref(), value_cell) {
            let entry = fields.entry(key.clone()).or_default();
            entry.push(' ');
            entry.push_str(&value);
        }
    }

    for value in fields.values_mut() {
        *value = collapse_whitespace(value);
    }

    if fields.get("ementa").is_none_or(String::is_empty) {
        tracing::debug!(
            discipline = fields.get("discipline").map(String::as_str),
            "syllabus table has no ementa"
        );
        return None;
    }

    Some(SyllabusRecord { fields })
}
