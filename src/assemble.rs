use crate::classify::classify;
use crate::curriculum::parse_curriculum_matrix;
use crate::electives::parse_elective_courses;
use crate::faculty::parse_faculty_roster;
use crate::model::{PageRecord, ParsedRecord, RawTable, SchedulePageRecord, TableType};
use crate::options::ClassifierConfig;
use crate::schedule_cell::{RoomMatcher, backfill_room, default_room};
use crate::schedule_grid::parse_schedule_grid;
use crate::schedule_meta::ScheduleMetadata;
use crate::syllabus::parse_syllabus;
use crate::warning::{ExtractWarning, WarningCode};

pub const PPC_PAGE_TYPE: &str = "ppc";

#[must_use]
pub fn parse_table(table: &RawTable, table_type: TableType) -> Option<ParsedRecord> {
    match table_type {
        TableType::CurriculumMatrix => {
            parse_curriculum_matrix(table).map(ParsedRecord::Curriculum)
        }
        TableType::ElectiveCourses => {
            parse_elective_courses(table).map(ParsedRecord::ElectiveCourses)
        }
        TableType::FacultyRoster => parse_faculty_roster(table).map(ParsedRecord::FacultyRoster),
        TableType::CourseSyllabus => parse_syllabus(table).map(ParsedRecord::Syllabus),
        TableType::EquivalenceTable | TableType::Unknown => None,
    }
}

fn summarize(table_count: usize, table_types: &[TableType]) -> String {
    if table_count == 0 {
        return "no tables found on this page".to_string();
    }
    if table_types.is_empty() {
        return format!("{table_count} table(s) found, none with content");
    }

    let types = table_types
        .iter()
        .map(|table_type| table_type.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("processed {table_count} table(s); detected types: {types}")
}

/// A table that fails to parse never aborts the page; it only adds a
/// warning, and only for types that are expected to yield a record.
pub fn assemble_ppc_page(
    page_number: u32,
    tables: Vec<RawTable>,
    config: &ClassifierConfig,
    warnings: &mut Vec<ExtractWarning>,
) -> PageRecord {
    let table_count = tables.len();
    let mut table_types = Vec::new();
    let mut parsed_records = Vec::new();
    let mut raw_tables = Vec::new();

    for (table_index, table) in tables.into_iter().enumerate() {
        if table.is_empty() {
            continue;
        }

        let table_type = classify(&table, page_number, config);
        table_types.push(table_type);

        match parse_table(&table, table_type) {
            Some(record) => parsed_records.push(record),
            None if table_type.reports_parse_failure() => {
                tracing::warn!(
                    page = page_number,
                    table = table_index,
                    table_type = table_type.as_str(),
                    "table was detected but could not be parsed"
                );
                warnings.push(
                    ExtractWarning::new(
                        WarningCode::ShapeParseFailed,
                        format!("detected {} but failed to parse it", table_type.as_str()),
                    )
                    .with_page(page_number)
                    .with_table_index(table_index),
                );
            }
            None => {}
        }

        raw_tables.push(table);
    }

    if table_count == 0 {
        warnings.push(
            ExtractWarning::new(WarningCode::NoTablesDetected, "no tables found on page")
                .with_page(page_number),
        );
    }

    PageRecord {
        page_type: PPC_PAGE_TYPE,
        page_number,
        summary: summarize(table_count, &table_types),
        table_types,
        parsed_records,
        raw_tables,
    }
}

/// Builds the record for one schedule page; `None` when no timetable could
/// be reconstructed.
pub fn assemble_schedule_page(
    page_number: u32,
    metadata: ScheduleMetadata,
    tables: Vec<RawTable>,
    rooms: &RoomMatcher,
    warnings: &mut Vec<ExtractWarning>,
) -> Option<SchedulePageRecord> {
    let Some(table) = tables.first() else {
        warnings.push(
            ExtractWarning::new(WarningCode::NoTablesDetected, "no tables found on page")
                .with_page(page_number),
        );
        return None;
    };

    if tables.len() > 1 {
        tracing::warn!(
            page = page_number,
            tables = tables.len(),
            "several tables on schedule page; only the first is parsed"
        );
        warnings.push(
            ExtractWarning::new(
                WarningCode::MultipleScheduleTables,
                format!("{} tables found; only the first was parsed", tables.len()),
            )
            .with_page(page_number),
        );
    }

    let Some(mut schedule) = parse_schedule_grid(table, rooms) else {
        tracing::warn!(page = page_number, "schedule table could not be parsed");
        warnings.push(
            ExtractWarning::new(WarningCode::ShapeParseFailed, "schedule table could not be parsed")
                .with_page(page_number)
                .with_table_index(0),
        );
        return None;
    };

    match default_room(metadata.rooms_info.as_deref()) {
        Some(room) => {
            tracing::debug!(page = page_number, room = room.as_str(), "default room resolved");
            backfill_room(&mut schedule, &room);
        }
        None => {
            let has_roomless_class = schedule
                .iter()
                .flat_map(|row| row.days.values())
                .any(|cell| cell.course.is_some() && cell.room.is_none());
            if has_roomless_class {
                warnings.push(
                    ExtractWarning::new(
                        WarningCode::NoDefaultRoom,
                        "no default room found; some classes have no room",
                    )
                    .with_page(page_number),
                );
            }
        }
    }

    Some(SchedulePageRecord {
        page_number,
        semester: metadata.semester,
        class_group: metadata.class_group,
        rooms_info: metadata.rooms_info,
        schedule,
    })
}
