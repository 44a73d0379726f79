use crate::grid::{Record, assign_fields, clean_records, drop_empty_records};
use crate::model::{CourseRow, CurriculumRecord, RawTable};
use crate::text::clean_cell;

pub(crate) const NAME: usize = 0;
pub(crate) const WEEKLY_THEORY: usize = 1;
pub(crate) const WEEKLY_PRACTICE: usize = 2;
pub(crate) const WEEKLY_TOTAL: usize = 3;
pub(crate) const SEMESTER_CLASS_HOURS: usize = 4;
pub(crate) const SEMESTER_HOURS: usize = 5;
pub(crate) const PREREQUISITES: usize = 6;
pub(crate) const COURSE_FIELDS: usize = 7;

/// Index of the first row whose column-0 text contains `needle` (lowercase).
pub(crate) fn find_in_first_column(table: &RawTable, needle: &str) -> Option<usize> {
    (0..table.height()).find(|&row| {
        clean_cell(table.cell(row, 0)).is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

pub(crate) fn course_from_record(record: Record) -> Option<CourseRow> {
    let mut fields = record.into_iter();
    let mut next = || fields.next().flatten();

    let name = next()?;
    Some(CourseRow {
        name,
        weekly_theory_hours: next(),
        weekly_practice_hours: next(),
        weekly_total_hours: next(),
        semester_class_hours: next(),
        semester_hours: next(),
        prerequisites: next(),
    })
}

/// Parses one semester block of the curriculum matrix.
///
/// The row right below the `DISCIPLINA` header holds the weekly/semester
/// sub-headers, so data starts two rows below it. Summary rows (`TOTAL`) are
/// dropped.
#[must_use]
pub fn parse_curriculum_matrix(table: &RawTable) -> Option<CurriculumRecord> {
    let period_title =
        find_in_first_column(table, "período").and_then(|row| clean_cell(table.cell(row, 0)));

    let Some(header_row) = find_in_first_column(table, "disciplina") else {
        tracing::debug!("curriculum matrix has no DISCIPLINA header");
        return None;
    };

    let data_start = header_row + 2;
    if data_start >= table.height() {
        tracing::debug!(
            period = period_title.as_deref(),
            "curriculum matrix header found but no data rows follow"
        );
        return None;
    }

    let mut rows = assign_fields(table, data_start, COURSE_FIELDS);
    rows.retain(|row| {
        !row[NAME]
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains("total"))
    });
    clean_records(&mut rows);
    drop_empty_records(&mut rows);

    let before = rows.len();
    let courses = rows
        .into_iter()
        .filter_map(course_from_record)
        .collect::<Vec<_>>();
    if courses.len() < before {
        tracing::debug!(
            dropped = before - courses.len(),
            "curriculum rows without a course name were dropped"
        );
    }

    if courses.is_empty() {
        return None;
    }

    Some(CurriculumRecord {
        period_title,
        courses,
    })
}
