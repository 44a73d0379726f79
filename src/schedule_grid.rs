use crate::grid::{Record, forward_fill};
use crate::model::{RawTable, ScheduleRow};
use crate::schedule_cell::{RoomMatcher, parse_cell};
use crate::text::{clean_cell, collapse_whitespace};

const WEEKDAYS: [&str; 5] = ["segunda", "terça", "quarta", "quinta", "sexta"];

pub const SCHEDULE_INFO_COLUMN: &str = "schedule_info";

fn mentions_weekday(text: &str) -> bool {
    let lower = text.to_lowercase();
    WEEKDAYS.iter().any(|day| lower.contains(day))
}

fn row_text(row: &Record) -> String {
    row.iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn column_names(header: &Record) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(header.len());
    for (index, cell) in header.iter().enumerate() {
        let mut name = match cell {
            Some(text) => collapse_whitespace(text),
            None if index == 0 => SCHEDULE_INFO_COLUMN.to_string(),
            None => format!("column_{index}"),
        };
        if names.contains(&name) {
            name = format!("{name}_{index}");
        }
        names.push(name);
    }
    names
}

/// Reshapes a weekly timetable grid into one row per time slot.
///
/// Merged cells spanning several slots are forward-filled down each weekday
/// column; separator rows (lunch, breaks) and rows without any course are
/// dropped.
#[must_use]
pub fn parse_schedule_grid(table: &RawTable, rooms: &RoomMatcher) -> Option<Vec<ScheduleRow>> {
    if table.is_empty() {
        return None;
    }

    let width = table.width();
    let grid: Vec<Record> = (0..table.height())
        .map(|index| {
            table
                .padded_row(index, width)
                .into_iter()
                .map(|cell| cell.filter(|text| !text.trim().is_empty()))
                .collect()
        })
        .collect();

    let header_row = grid
        .iter()
        .position(|row| mentions_weekday(&row_text(row)))
        .or_else(|| {
            tracing::debug!("no weekday header row; trying the first row");
            (grid[0].iter().flatten().count() >= 3).then_some(0)
        });
    let Some(header_row) = header_row else {
        tracing::debug!("first row does not look like a header either");
        return None;
    };

    let names = column_names(&grid[header_row]);
    let mut rows = grid[header_row + 1..].to_vec();

    let kept_columns = (0..width)
        .filter(|&col| rows.iter().any(|row| row[col].is_some()))
        .collect::<Vec<_>>();
    let day_columns = kept_columns
        .iter()
        .copied()
        .filter(|&col| mentions_weekday(&names[col]))
        .collect::<Vec<_>>();
    if day_columns.is_empty() {
        tracing::debug!("schedule grid has no weekday column with content");
        return None;
    }

    for &col in &day_columns {
        forward_fill(&mut rows, col);
    }
    rows.retain(|row| day_columns.iter().any(|&col| row[col].is_some()));

    let schedule = rows
        .iter()
        .map(|row| {
            let mut slot = ScheduleRow::default();
            for &col in &kept_columns {
                if day_columns.contains(&col) {
                    slot.days
                        .insert(names[col].clone(), parse_cell(row[col].as_deref(), rooms));
                } else {
                    slot.info
                        .insert(names[col].clone(), clean_cell(row[col].as_deref()));
                }
            }
            slot
        })
        .filter(|slot| slot.days.values().any(|cell| cell.course.is_some()))
        .collect::<Vec<_>>();

    if schedule.is_empty() {
        return None;
    }

    Some(schedule)
}
