#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use ppc_table_extract::{RawTable, StaticDocument};

/// One Courier page per entry, one text line per `Tj`.
pub fn build_pdf(pages: &[&[&str]]) -> Result<Document, Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![40.into(), 800.into()]),
        ];
        for (index, line) in lines.iter().enumerate() {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            if index + 1 < lines.len() {
                operations.push(Operation::new("T*", vec![]));
            }
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        page_ids.push(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        }));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<_>>(),
            "Count" => i64::try_from(page_ids.len())?,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

pub fn write_pdf(path: &Path, pages: &[&[&str]]) -> Result<(), Box<dyn std::error::Error>> {
    build_pdf(pages)?.save(path)?;
    Ok(())
}

/// ASCII-only faculty roster; the PDF fixtures use a standard 14 font.
pub const FACULTY_PAGE: &[&str] = &[
    "Corpo docente do curso.",
    "Item  Nome do Professor  Formacao  Regime de Trabalho",
    "1  Ana Souza  Doutorado  40h",
    "2  Bruno Lima  Mestrado  DE",
];

pub const PROSE_PAGE: &[&str] = &["Este documento nao tem tabelas."];

pub fn curriculum_table() -> RawTable {
    RawTable::from_text_rows([
        vec!["1º PERÍODO", "", "", "", "", "", ""],
        vec!["DISCIPLINA", "CH SEMANAL", "", "", "CH SEMESTRAL", "", "PRÉ- REQUISITOS"],
        vec!["", "T", "P", "Total", "Aulas", "Horas", ""],
        vec!["Algoritmos I", "2", "2", "4", "80", "60", ""],
        vec!["Cálculo I", "4", "0", "4", "80", "60", ""],
        vec!["TOTAL", "", "", "8", "160", "120", ""],
    ])
}

pub fn elective_continuation_table() -> RawTable {
    RawTable::from_text_rows([
        vec!["Tópicos Especiais em IA", "2", "2", "4", "80", "60", "Algoritmos I"],
        vec!["", "", "", "", "", "", "Cálculo I"],
        vec!["Algoritmos Geométricos", "4", "0", "4", "80", "60", ""],
    ])
}

pub fn faculty_table() -> RawTable {
    RawTable::from_text_rows([
        vec!["Item", "Nome do Professor", "Formação", "Regime de Trabalho"],
        vec!["1", "Ana Souza", "Doutorado", ""],
        vec!["", "", "em Computação", "40h DE"],
    ])
}

pub fn syllabus_table() -> RawTable {
    RawTable::from_text_rows([
        vec!["Disciplina:", "Algoritmos I", "60h", "4"],
        vec!["Ementa:", "Estruturas de controle", "", ""],
        vec!["", "e funções.", "", ""],
        vec!["Bibliografia Básica:", "Cormen", "", ""],
    ])
}

/// A program document with one table of each parsed kind and one empty page.
pub fn program_document() -> StaticDocument {
    StaticDocument::new()
        .with_page(12, "Matriz curricular", vec![curriculum_table()])
        .with_page(26, "Optativas", vec![elective_continuation_table()])
        .with_page(40, "Ementário", vec![syllabus_table()])
        .with_page(41, "Texto corrido.", Vec::new())
        .with_page(90, "Corpo docente", vec![faculty_table()])
}

pub const SCHEDULE_HEADING: &str = "INSTITUTO FEDERAL\n1/2025\nCIÊNCIA DA COMPUTAÇÃO - 1º Período\nSALAS: P2 - Sala 7, LabCC\n";

pub fn schedule_table() -> RawTable {
    RawTable::from_text_rows([
        vec!["", "Segunda", "Terça", "Quarta"],
        vec![
            "19:00 - 19:50",
            "Algoritmos I (Ana Souza)",
            "Cálculo I (Bruno Lima) LabCC",
            "",
        ],
        vec!["19:50 - 20:40", "", "", "Redes (Carla) Sala 3"],
    ])
}
