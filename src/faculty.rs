use crate::grid::{
    Record, Reducer, assign_fields, clean_records, drop_empty_records, forward_fill, group_by,
};
use crate::model::{FacultyMember, FacultyRoster, RawTable};

const ITEM: usize = 0;
const NAME: usize = 1;
const FORMATION: usize = 2;
const REGIME: usize = 3;

fn find_header_row(table: &RawTable) -> Option<usize> {
    table.rows().iter().position(|row| {
        let text = row
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        text.contains("nome do professor") && text.contains("regime de trabalho")
    })
}

/// Parses the faculty roster: one entry per professor, with the formation
/// lines of a merged cell joined back together.
#[must_use]
pub fn parse_faculty_roster(table: &RawTable) -> Option<FacultyRoster> {
    let data_start = find_header_row(table).map_or(0, |header_row| header_row + 1);

    let mut rows: Vec<Record> = match table.width() {
        4 => assign_fields(table, data_start, 4),
        3 => {
            tracing::debug!("faculty table has 3 columns; assuming name, formation, regime");
            assign_fields(table, data_start, 3)
                .into_iter()
                .map(|mut row| {
                    row.insert(ITEM, None);
                    row
                })
                .collect()
        }
        width => {
            tracing::debug!(width, "faculty table has an unexpected column count");
            return None;
        }
    };

    clean_records(&mut rows);
    drop_empty_records(&mut rows);
    forward_fill(&mut rows, ITEM);
    forward_fill(&mut rows, NAME);
    rows.retain(|row| row[FORMATION].is_some());

    let members = group_by(rows, NAME)
        .into_iter()
        .map(|(name, group)| FacultyMember {
            item: Reducer::First.reduce(&group, ITEM),
            name,
            formation: Reducer::JoinAll.reduce(&group, FORMATION).unwrap_or_default(),
            regime: Reducer::Last.reduce(&group, REGIME),
        })
        .collect::<Vec<_>>();

    if members.is_empty() {
        return None;
    }

    Some(FacultyRoster { members })
}
