use crate::curriculum::{
    COURSE_FIELDS, NAME, PREREQUISITES, SEMESTER_CLASS_HOURS, SEMESTER_HOURS, WEEKLY_PRACTICE,
    WEEKLY_THEORY, WEEKLY_TOTAL, find_in_first_column,
};
use crate::grid::{Reducer, assign_fields, clean_records, drop_empty_records, forward_fill, group_by};
use crate::model::{CourseRow, ElectiveCoursesRecord, RawTable};

/// Merged name cells span several physical rows. Hours come from the rows
/// carrying total weekly hours; the other rows only add prerequisites.
#[must_use]
pub fn parse_elective_courses(table: &RawTable) -> Option<ElectiveCoursesRecord> {
    let data_start = match find_in_first_column(table, "disciplina") {
        Some(header_row) => header_row + 2,
        None => {
            tracing::debug!("elective table has no header; treating it as a continuation page");
            0
        }
    };

    if data_start >= table.height() {
        tracing::debug!(data_start, "elective table has no data rows");
        return None;
    }

    let mut rows = assign_fields(table, data_start, COURSE_FIELDS);
    clean_records(&mut rows);
    forward_fill(&mut rows, NAME);
    drop_empty_records(&mut rows);

    let courses = group_by(rows, NAME)
        .into_iter()
        .filter_map(|(name, group)| {
            let timed = group
                .iter()
                .filter(|row| row[WEEKLY_TOTAL].is_some())
                .cloned()
                .collect::<Vec<_>>();
            if timed.is_empty() {
                return None;
            }
            Some(CourseRow {
                name,
                weekly_theory_hours: Reducer::First.reduce(&timed, WEEKLY_THEORY),
                weekly_practice_hours: Reducer::First.reduce(&timed, WEEKLY_PRACTICE),
                weekly_total_hours: Reducer::First.reduce(&timed, WEEKLY_TOTAL),
                semester_class_hours: Reducer::First.reduce(&timed, SEMESTER_CLASS_HOURS),
                semester_hours: Reducer::First.reduce(&timed, SEMESTER_HOURS),
                prerequisites: Reducer::JoinUnique.reduce(&group, PREREQUISITES),
            })
        })
        .collect::<Vec<_>>();

    if courses.is_empty() {
        return None;
    }

    Some(ElectiveCoursesRecord { courses })
}
