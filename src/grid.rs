use indexmap::IndexMap;

use crate::model::RawTable;
use crate::text::clean_cell;

pub(crate) type Record = Vec<Option<String>>;

pub(crate) fn assign_fields(table: &RawTable, start: usize, field_count: usize) -> Vec<Record> {
    (start..table.height())
        .map(|index| table.padded_row(index, field_count))
        .collect()
}

pub(crate) fn clean_records(rows: &mut [Record]) {
    for row in rows {
        for cell in row.iter_mut() {
            *cell = clean_cell(cell.as_deref());
        }
    }
}

pub(crate) fn drop_empty_records(rows: &mut Vec<Record>) {
    rows.retain(|row| row.iter().any(Option::is_some));
}

/// Copies the last non-null value of `col` into the null cells below it.
pub(crate) fn forward_fill(rows: &mut [Record], col: usize) {
    let mut last: Option<String> = None;
    for cell in rows.iter_mut().filter_map(|row| row.get_mut(col)) {
        if cell.is_some() {
            last.clone_from(cell);
        } else {
            cell.clone_from(&last);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reducer {
    First,
    Last,
    JoinAll,
    // Distinct values in first-seen order.
    JoinUnique,
}

impl Reducer {
    pub(crate) fn reduce(self, rows: &[Record], col: usize) -> Option<String> {
        let mut values = rows
            .iter()
            .filter_map(|row| row.get(col).and_then(Option::as_deref));

        match self {
            Self::First => values.next().map(str::to_string),
            Self::Last => values.last().map(str::to_string),
            Self::JoinAll => join(values.collect()),
            Self::JoinUnique => {
                let mut seen = Vec::new();
                for value in values {
                    if !seen.contains(&value) {
                        seen.push(value);
                    }
                }
                join(seen)
            }
        }
    }
}

fn join(values: Vec<&str>) -> Option<String> {
    (!values.is_empty()).then(|| values.join(" "))
}

/// Groups rows by the value of `key_col`, keeping first-seen key order.
/// Rows with a null key belong to no group and are dropped.
pub(crate) fn group_by(rows: Vec<Record>, key_col: usize) -> IndexMap<String, Vec<Record>> {
    let mut groups: IndexMap<String, Vec<Record>> = IndexMap::new();
    for row in rows {
        let Some(key) = row.get(key_col).cloned().flatten() else {
            continue;
        };
        groups.entry(key).or_default().push(row);
    }
    groups
}
