use crate::model::{RawTable, TableType};
use crate::options::ClassifierConfig;
use crate::text::flatten_table_text;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct Signature<'a> {
    pub text: &'a str,
    pub page_number: u32,
    pub config: &'a ClassifierConfig,
}

impl Signature<'_> {
    fn has(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub tag: TableType,
    pub matches: fn(&Signature<'_>) -> bool,
}

fn is_syllabus(sig: &Signature<'_>) -> bool {
    sig.has("disciplina:") && sig.has("ementa:") && sig.has("bibliografia básica:")
}

fn has_course_matrix_header(sig: &Signature<'_>) -> bool {
    sig.has("disciplina")
        && sig.has("ch semanal")
        && (sig.has("pré – requisitos") || sig.has("pré- requisitos"))
}

fn is_elective_matrix(sig: &Signature<'_>) -> bool {
    has_course_matrix_header(sig) && sig.has("disciplinas optativas")
}

fn is_elective_continuation(sig: &Signature<'_>) -> bool {
    sig.config.elective_override_pages.contains(sig.page_number)
        && sig
            .config
            .elective_override_keywords
            .iter()
            .any(|keyword| sig.has(keyword))
}

fn is_faculty_roster(sig: &Signature<'_>) -> bool {
    sig.has("nome do professor")
        || (sig.has("formação") && sig.has("regime de trabalho"))
        || (sig.config.faculty_special_pages.contains(&sig.page_number) && sig.has("mestrado em"))
}

fn is_equivalence_table(sig: &Signature<'_>) -> bool {
    sig.has("componentes curriculares") && sig.has("matriz 2015")
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "syllabus",
        tag: TableType::CourseSyllabus,
        matches: is_syllabus,
    },
    Rule {
        name: "elective-matrix",
        tag: TableType::ElectiveCourses,
        matches: is_elective_matrix,
    },
    Rule {
        name: "curriculum-matrix",
        tag: TableType::CurriculumMatrix,
        matches: has_course_matrix_header,
    },
    Rule {
        name: "elective-continuation-page",
        tag: TableType::ElectiveCourses,
        matches: is_elective_continuation,
    },
    Rule {
        name: "faculty-roster",
        tag: TableType::FacultyRoster,
        matches: is_faculty_roster,
    },
    Rule {
        name: "equivalence",
        tag: TableType::EquivalenceTable,
        matches: is_equivalence_table,
    },
];

#[must_use]
pub fn classify_text(text: &str, page_number: u32, config: &ClassifierConfig) -> TableType {
    let signature = Signature {
        text,
        page_number,
        config,
    };

    RULES
        .iter()
        .find(|rule| (rule.matches)(&signature))
        .map_or(TableType::Unknown, |rule| {
            tracing::debug!(page = page_number, rule = rule.name, "table classified");
            rule.tag
        })
}

#[must_use]
pub fn classify(table: &RawTable, page_number: u32, config: &ClassifierConfig) -> TableType {
    classify_text(&flatten_table_text(table), page_number, config)
}
