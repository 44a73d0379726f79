use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// Grid of text cells for one table, as handed over by the table source.
///
/// Rows may be ragged; a missing trailing cell reads as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawTable {
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    #[must_use]
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Builds a table from plain strings; an empty string becomes a null cell.
    pub fn from_text_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        let cell = cell.as_ref();
                        (!cell.is_empty()).then(|| cell.to_string())
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    #[must_use]
    pub fn padded_row(&self, row: usize, width: usize) -> Vec<Option<String>> {
        let mut out = self.rows.get(row).cloned().unwrap_or_default();
        out.resize(width, None);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableType {
    CurriculumMatrix,
    ElectiveCourses,
    FacultyRoster,
    CourseSyllabus,
    EquivalenceTable,
    Unknown,
}

impl TableType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurriculumMatrix => "curriculum_matrix",
            Self::ElectiveCourses => "elective_courses",
            Self::FacultyRoster => "faculty_roster",
            Self::CourseSyllabus => "course_syllabus",
            Self::EquivalenceTable => "equivalence_table",
            Self::Unknown => "unknown",
        }
    }

    /// Whether a missing record for this type deserves a warning.
    #[must_use]
    pub const fn reports_parse_failure(self) -> bool {
        !matches!(
            self,
            Self::EquivalenceTable | Self::Unknown | Self::CourseSyllabus
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CourseRow {
    pub name: String,
    pub weekly_theory_hours: Option<String>,
    pub weekly_practice_hours: Option<String>,
    pub weekly_total_hours: Option<String>,
    pub semester_class_hours: Option<String>,
    pub semester_hours: Option<String>,
    pub prerequisites: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurriculumRecord {
    pub period_title: Option<String>,
    pub courses: Vec<CourseRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectiveCoursesRecord {
    pub courses: Vec<CourseRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyMember {
    pub item: Option<String>,
    pub name: String,
    pub formation: String,
    pub regime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacultyRoster {
    pub members: Vec<FacultyMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SyllabusRecord {
    pub fields: IndexMap<String, String>,
}

impl SyllabusRecord {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleCell {
    pub course: Option<String>,
    pub instructor: Option<String>,
    pub room: Option<String>,
}

/// One time slot of a schedule grid.
///
/// `info` keeps the non-weekday columns (time of day, notes) verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    #[serde(flatten)]
    pub info: IndexMap<String, Option<String>>,
    #[serde(flatten)]
    pub days: IndexMap<String, ScheduleCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchedulePageRecord {
    pub page_number: u32,
    pub semester: Option<String>,
    pub class_group: Option<String>,
    pub rooms_info: Option<String>,
    pub schedule: Vec<ScheduleRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "record_type", rename_all = "snake_case")]
pub enum ParsedRecord {
    Curriculum(CurriculumRecord),
    ElectiveCourses(ElectiveCoursesRecord),
    FacultyRoster(FacultyRoster),
    Syllabus(SyllabusRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub page_type: &'static str,
    pub page_number: u32,
    pub table_types: Vec<TableType>,
    pub parsed_records: Vec<ParsedRecord>,
    pub raw_tables: Vec<RawTable>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedOutput {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub table_count: usize,
    pub row_count: usize,
}
