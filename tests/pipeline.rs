mod common;

use std::collections::BTreeMap;
use std::process::Command;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

use ppc_table_extract::{
    CourseRow, CurriculumRecord, DocumentMetadata, ElectiveCoursesRecord, ExtractError,
    ExtractOptions, FacultyMember, FacultyRoster, PageSource, ParsedRecord, RawTable,
    StaticDocument, TableSource, TableType, WarningCode, chunk_document, classify,
    extract_ppc, extract_ppc_from_pdf, extract_schedules,
};

fn course(name: &str, hours: [&str; 5], prerequisites: Option<&str>) -> CourseRow {
    let [theory, practice, total, class_hours, semester_hours] = hours.map(str::to_string);
    CourseRow {
        name: name.to_string(),
        weekly_theory_hours: Some(theory),
        weekly_practice_hours: Some(practice),
        weekly_total_hours: Some(total),
        semester_class_hours: Some(class_hours),
        semester_hours: Some(semester_hours),
        prerequisites: prerequisites.map(str::to_string),
    }
}

#[test]
fn program_document_yields_one_record_per_table() {
    let report = extract_ppc(&common::program_document(), &ExtractOptions::default())
        .expect("extraction should succeed");

    let page_numbers = report
        .pages
        .iter()
        .map(|page| page.page_number)
        .collect::<Vec<_>>();
    assert_eq!(page_numbers, vec![12, 26, 40, 41, 90]);

    let types = report
        .pages
        .iter()
        .map(|page| page.table_types.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        types,
        vec![
            vec![TableType::CurriculumMatrix],
            vec![TableType::ElectiveCourses],
            vec![TableType::CourseSyllabus],
            Vec::new(),
            vec![TableType::FacultyRoster],
        ]
    );

    assert_eq!(
        report.pages[0].parsed_records,
        vec![ParsedRecord::Curriculum(CurriculumRecord {
            period_title: Some("1º PERÍODO".to_string()),
            courses: vec![
                course("Algoritmos I", ["2", "2", "4", "80", "60"], None),
                course("Cálculo I", ["4", "0", "4", "80", "60"], None),
            ],
        })]
    );

    assert_eq!(
        report.pages[1].parsed_records,
        vec![ParsedRecord::ElectiveCourses(ElectiveCoursesRecord {
            courses: vec![
                course(
                    "Tópicos Especiais em IA",
                    ["2", "2", "4", "80", "60"],
                    Some("Algoritmos I Cálculo I"),
                ),
                course("Algoritmos Geométricos", ["4", "0", "4", "80", "60"], None),
            ],
        })]
    );

    let ParsedRecord::Syllabus(syllabus) = &report.pages[2].parsed_records[0] else {
        panic!("expected a syllabus record");
    };
    assert_eq!(
        syllabus.fields.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "discipline",
            "credit_load",
            "weekly_classes",
            "ementa",
            "bibliografia_básica"
        ]
    );
    assert_eq!(syllabus.get("ementa"), Some("Estruturas de controle e funções."));

    assert_eq!(
        report.pages[4].parsed_records,
        vec![ParsedRecord::FacultyRoster(FacultyRoster {
            members: vec![FacultyMember {
                item: Some("1".to_string()),
                name: "Ana Souza".to_string(),
                formation: "Doutorado em Computação".to_string(),
                regime: Some("40h DE".to_string()),
            }],
        })]
    );

    assert_eq!(report.pages[3].summary, "no tables found on this page");
    assert_eq!(
        report.pages[4].summary,
        "processed 1 table(s); detected types: faculty_roster"
    );
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, WarningCode::NoTablesDetected);
    assert_eq!(report.warnings[0].page, Some(41));
    assert_eq!(report.record_count(), 4);
}

#[test]
fn page_records_serialize_with_tagged_records() {
    let document = StaticDocument::new().with_page(90, "", vec![common::faculty_table()]);
    let report = extract_ppc(&document, &ExtractOptions::default()).expect("extraction");

    let value = serde_json::to_value(&report.pages[0]).expect("serializable");
    assert_eq!(value["page_type"], json!("ppc"));
    assert_eq!(value["table_types"], json!(["faculty_roster"]));
    assert_eq!(value["parsed_records"][0]["record_type"], json!("faculty_roster"));
    assert_eq!(
        value["parsed_records"][0]["members"][0]["formation"],
        json!("Doutorado em Computação")
    );
    assert_eq!(value["raw_tables"][0][1][2], json!("Doutorado"));
    assert_eq!(value["raw_tables"][0][1][3], json!(null));
}

#[test]
fn repeated_runs_are_identical() {
    let document = common::program_document();
    let options = ExtractOptions::default();

    let first = serde_json::to_string(&extract_ppc(&document, &options).expect("first run"))
        .expect("serializable");
    let second = serde_json::to_string(&extract_ppc(&document, &options).expect("second run"))
        .expect("serializable");
    assert_eq!(first, second);

    let config = options.classifier;
    let table = common::elective_continuation_table();
    assert_eq!(classify(&table, 26, &config), classify(&table, 26, &config));
    assert_eq!(classify(&table, 26, &config), TableType::ElectiveCourses);
    assert_eq!(classify(&table, 30, &config), TableType::Unknown);
}

struct FlakySource;

impl PageSource for FlakySource {
    fn page_numbers(&self) -> Vec<u32> {
        vec![1, 2]
    }
}

impl TableSource for FlakySource {
    fn get_tables(&self, page_number: u32) -> Result<Vec<RawTable>, ExtractError> {
        if page_number == 1 {
            Err(ExtractError::PdfExtract("broken content stream".to_string()))
        } else {
            Ok(vec![common::faculty_table()])
        }
    }
}

#[test]
fn failing_page_does_not_abort_the_run() {
    let report = extract_ppc(&FlakySource, &ExtractOptions::default()).expect("extraction");

    assert_eq!(report.pages.len(), 2);
    assert!(report.pages[0].parsed_records.is_empty());
    assert_eq!(report.pages[1].parsed_records.len(), 1);

    let codes = report
        .warnings
        .iter()
        .map(|warning| (warning.code, warning.page))
        .collect::<Vec<_>>();
    assert_eq!(
        codes,
        vec![
            (WarningCode::ExtractionFailed, Some(1)),
            (WarningCode::NoTablesDetected, Some(1)),
        ]
    );
}

#[test]
fn schedule_pages_are_rebuilt_with_default_room() {
    let document = StaticDocument::new()
        .with_page(1, common::SCHEDULE_HEADING, vec![common::schedule_table()])
        .with_page(
            2,
            common::SCHEDULE_HEADING,
            vec![RawTable::from_text_rows([vec!["a", "b"], vec!["c", "d"]])],
        );

    let report = extract_schedules(&document, &ExtractOptions::default()).expect("extraction");

    assert_eq!(report.pages.len(), 1);
    assert_eq!(
        serde_json::to_value(&report.pages[0]).expect("serializable"),
        json!({
            "page_number": 1,
            "semester": "1/2025",
            "class_group": "1º Período",
            "rooms_info": "P2 - Sala 7, LabCC",
            "schedule": [
                {
                    "schedule_info": "19:00 - 19:50",
                    "Segunda": {"course": "Algoritmos I", "instructor": "Ana Souza", "room": "P2 - Sala 7"},
                    "Terça": {"course": "Cálculo I", "instructor": "Bruno Lima", "room": "LabCC"},
                    "Quarta": {"course": null, "instructor": null, "room": null},
                },
                {
                    "schedule_info": "19:50 - 20:40",
                    "Segunda": {"course": "Algoritmos I", "instructor": "Ana Souza", "room": "P2 - Sala 7"},
                    "Terça": {"course": "Cálculo I", "instructor": "Bruno Lima", "room": "LabCC"},
                    "Quarta": {"course": "Redes", "instructor": "Carla", "room": "Sala 3"},
                },
            ],
        })
    );

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, WarningCode::ShapeParseFailed);
    assert_eq!(report.warnings[0].page, Some(2));
}

#[test]
fn chunks_are_deduplicated_across_pages_and_enriched() {
    let body = "CAPÍTULO I\nO PPC define o perfil do egresso e a organização curricular do curso.";
    let document = StaticDocument::new()
        .with_page(1, body, Vec::new())
        .with_page(2, format!("{body}\nArt 2º Disposições finais."), Vec::new());
    let options = ExtractOptions {
        acronyms: BTreeMap::from([(
            "PPC".to_string(),
            "Projeto Pedagógico do Curso".to_string(),
        )]),
        ..ExtractOptions::default()
    };
    let metadata = DocumentMetadata::new("ppc-cc", "ppc.pdf");

    let report = chunk_document(&document, &options, &metadata).expect("chunking");

    assert_eq!(
        report.chunks,
        vec![
            json!({
                "page_number": 1,
                "chapter": "CAPÍTULO I",
                "section": null,
                "article": null,
                "text": body,
                "doc_id": "ppc-cc",
                "doc_name": "ppc.pdf",
                "normalized_text": "capítulo i o projeto pedagógico do curso define o perfil do egresso e a organização curricular do curso.",
            }),
            json!({
                "page_number": 2,
                "chapter": "CAPÍTULO I",
                "section": null,
                "article": "Art 2º",
                "text": "Art 2º Disposições finais.",
                "doc_id": "ppc-cc",
                "doc_name": "ppc.pdf",
                "normalized_text": "art 2º disposições finais.",
            }),
        ]
    );
}

#[test]
fn faculty_roster_is_read_from_a_pdf() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("docentes.pdf");
    common::write_pdf(&input, &[common::FACULTY_PAGE]).expect("PDF fixture should be created");

    let report = extract_ppc_from_pdf(&input, &ExtractOptions::default())
        .expect("extraction should succeed");

    let names = report
        .pages
        .iter()
        .flat_map(|page| &page.parsed_records)
        .filter_map(|record| match record {
            ParsedRecord::FacultyRoster(roster) => Some(roster),
            _ => None,
        })
        .flat_map(|roster| roster.members.iter().map(|member| member.name.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Ana Souza", "Bruno Lima"], "report: {report:?}");
}

#[test]
fn cli_writes_raw_tables_csv() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("docentes.pdf");
    let output = dir.path().join("raw.csv");
    common::write_pdf(&input, &[common::FACULTY_PAGE]).expect("PDF fixture should be created");

    let status = Command::new(env!("CARGO_BIN_EXE_ppc2json"))
        .arg("raw")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .expect("binary should run");

    assert_eq!(status.code(), Some(0));
    let csv = std::fs::read_to_string(&output).expect("CSV should be readable");
    assert!(csv.starts_with("page,table_id,col_1"), "unexpected CSV: {csv:?}");
    assert!(csv.contains("1,1,1,Ana Souza,Doutorado,40h"), "unexpected CSV: {csv:?}");
}

#[test]
fn cli_exits_with_code_2_when_nothing_is_parsed() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("prosa.pdf");
    let output = dir.path().join("out.json");
    common::write_pdf(&input, &[common::PROSE_PAGE])
        .expect("PDF fixture should be created");

    let status = Command::new(env!("CARGO_BIN_EXE_ppc2json"))
        .arg("ppc")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .status()
        .expect("binary should run");

    assert_eq!(status.code(), Some(2));
}
