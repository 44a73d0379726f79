use std::collections::BTreeMap;

use regex::Regex;

use crate::error::ExtractError;
use crate::model::RawTable;

#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[must_use]
pub fn clean_cell(cell: Option<&str>) -> Option<String> {
    let cleaned = collapse_whitespace(cell?);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// `"Pré-requisitos :"` -> `"pré-requisitos"`, `"Bibliografia Básica:"` -> `"bibliografia_básica"`.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(':')
        .trim_end()
        .to_lowercase()
        .replace(' ', "_")
}

/// Lowercased text of every non-null cell, row-major. Rows are joined with a
/// space so header phrases wrapped onto the next row still match.
#[must_use]
pub fn flatten_table_text(table: &RawTable) -> String {
    table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Lowercases, expands whole-word acronyms and collapses whitespace.
pub fn normalize_text(
    text: &str,
    acronyms: &BTreeMap<String, String>,
) -> Result<String, ExtractError> {
    let mut text = text.to_lowercase();

    for (acronym, expansion) in acronyms {
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(&acronym.to_lowercase())))?;
        text = pattern
            .replace_all(&text, regex::NoExpand(&expansion.to_lowercase()))
            .into_owned();
    }

    Ok(collapse_whitespace(&text))
}
