mod assemble;
mod chunking;
mod classify;
mod curriculum;
mod dedup;
mod document;
mod electives;
mod enrich;
mod error;
mod faculty;
mod grid;
mod merge;
mod model;
mod options;
mod output;
mod pdf_reader;
mod schedule_cell;
mod schedule_grid;
mod schedule_meta;
mod syllabus;
mod table_detect;
mod table_parse;
mod text;
mod warning;

use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::warning::WarningCode as Code;

pub use assemble::{PPC_PAGE_TYPE, assemble_ppc_page, assemble_schedule_page, parse_table};
pub use chunking::{Chunk, StructureChunker, chunk_text};
pub use classify::{RULES, Rule, Signature, classify, classify_text};
pub use curriculum::parse_curriculum_matrix;
pub use dedup::deduplicate;
pub use document::{PageSource, PageTextSource, PdfDocument, StaticDocument, TableSource};
pub use electives::parse_elective_courses;
pub use enrich::{DocumentMetadata, enrich};
pub use error::ExtractError;
pub use faculty::parse_faculty_roster;
pub use merge::merge_raw_tables;
pub use model::{
    CourseRow, CurriculumRecord, ElectiveCoursesRecord, FacultyMember, FacultyRoster,
    MergedOutput, PageRecord, ParsedRecord, RawTable, ScheduleCell, SchedulePageRecord,
    ScheduleRow, SyllabusRecord, TableType,
};
pub use options::{
    ClassifierConfig, ExtractOptions, ListOverride, PageRange, PageSelection, ScheduleConfig,
};
pub use output::{raw_tables_to_csv_string, write_json, write_raw_tables_csv};
pub use schedule_cell::{DEFAULT_ROOM_PATTERNS, RoomMatcher, backfill_room, default_room, parse_cell};
pub use schedule_grid::{SCHEDULE_INFO_COLUMN, parse_schedule_grid};
pub use schedule_meta::{MetadataScanner, ScheduleMetadata};
pub use syllabus::parse_syllabus;
pub use text::{clean_cell, collapse_whitespace, flatten_table_text, normalize_key, normalize_text};
pub use warning::{ExtractWarning, WarningCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PpcReport {
    pub pages: Vec<PageRecord>,
    pub warnings: Vec<ExtractWarning>,
}

impl PpcReport {
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.pages.iter().map(|page| page.parsed_records.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleReport {
    pub pages: Vec<SchedulePageRecord>,
    pub warnings: Vec<ExtractWarning>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkReport {
    pub chunks: Vec<Value>,
    pub warnings: Vec<ExtractWarning>,
}

fn validate_options(options: &ExtractOptions) -> Result<(), ExtractError> {
    if options.min_cols < 2 {
        return Err(ExtractError::InvalidOption(
            "min_cols must be at least 2".to_string(),
        ));
    }
    Ok(())
}

fn selected_pages<S: PageSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<Vec<u32>, ExtractError> {
    let pages = source
        .page_numbers()
        .into_iter()
        .filter(|page| {
            options
                .pages
                .as_ref()
                .is_none_or(|selection| selection.contains(*page))
        })
        .collect::<Vec<_>>();

    if pages.is_empty() {
        return Err(ExtractError::NoPagesSelected);
    }
    Ok(pages)
}

/// Tables of one page; a failing source counts as a page without tables.
fn tables_or_warn<S: TableSource + ?Sized>(
    source: &S,
    page_number: u32,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<RawTable> {
    match source.get_tables(page_number) {
        Ok(tables) => tables,
        Err(error) => {
            tracing::warn!(page = page_number, %error, "table extraction failed");
            warnings.push(
                ExtractWarning::new(
                    Code::ExtractionFailed,
                    format!("table extraction failed: {error}"),
                )
                .with_page(page_number),
            );
            Vec::new()
        }
    }
}

fn text_or_warn<S: PageTextSource + ?Sized>(
    source: &S,
    page_number: u32,
    warnings: &mut Vec<ExtractWarning>,
) -> String {
    match source.page_text(page_number) {
        Ok(text) => text,
        Err(error) => {
            tracing::warn!(page = page_number, %error, "page text unavailable");
            warnings.push(
                ExtractWarning::new(
                    Code::PageTextUnavailable,
                    format!("page text unavailable: {error}"),
                )
                .with_page(page_number),
            );
            String::new()
        }
    }
}

pub fn extract_ppc<S: TableSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<PpcReport, ExtractError> {
    validate_options(options)?;

    let mut warnings = Vec::new();
    let mut pages = Vec::new();
    for page_number in selected_pages(source, options)? {
        let tables = tables_or_warn(source, page_number, &mut warnings);
        tracing::info!(page = page_number, tables = tables.len(), "processing page");
        pages.push(assemble_ppc_page(
            page_number,
            tables,
            &options.classifier,
            &mut warnings,
        ));
    }

    Ok(PpcReport { pages, warnings })
}

/// Rebuilds the timetable of every selected schedule page. Pages without a
/// usable timetable are left out of the report.
pub fn extract_schedules<S: TableSource + PageTextSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<ScheduleReport, ExtractError> {
    validate_options(options)?;
    let scanner = MetadataScanner::new(&options.schedule)?;
    let rooms = RoomMatcher::from_config(&options.schedule)?;

    let mut warnings = Vec::new();
    let mut pages = Vec::new();
    for page_number in selected_pages(source, options)? {
        let metadata = scanner.scan(&text_or_warn(source, page_number, &mut warnings));
        let tables = tables_or_warn(source, page_number, &mut warnings);
        tracing::info!(page = page_number, tables = tables.len(), "processing schedule page");

        if let Some(record) =
            assemble_schedule_page(page_number, metadata, tables, &rooms, &mut warnings)
        {
            pages.push(record);
        }
    }

    Ok(ScheduleReport { pages, warnings })
}

/// Page text -> structural chunks -> deduplication -> metadata enrichment.
///
/// Every enriched chunk also carries `normalized_text` (lowercased, acronyms
/// expanded, whitespace collapsed).
pub fn chunk_document<S: PageTextSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
    metadata: &DocumentMetadata,
) -> Result<ChunkReport, ExtractError> {
    let mut warnings = Vec::new();
    let mut chunks = Vec::new();
    for page_number in selected_pages(source, options)? {
        let text = text_or_warn(source, page_number, &mut warnings);
        chunks.extend(chunk_text(&text).into_iter().map(|mut chunk| {
            chunk.page_number = Some(page_number);
            chunk
        }));
    }

    let unique = deduplicate(chunks, options.dedup_min_length);
    let mut enriched = enrich(&unique, metadata.as_map())?;
    for (value, chunk) in enriched.iter_mut().zip(&unique) {
        if let Value::Object(object) = value {
            object.insert(
                "normalized_text".to_string(),
                Value::String(normalize_text(&chunk.text, &options.acronyms)?),
            );
        }
    }

    Ok(ChunkReport {
        chunks: enriched,
        warnings,
    })
}

pub fn extract_ppc_from_pdf(
    input_pdf: &Path,
    options: &ExtractOptions,
) -> Result<PpcReport, ExtractError> {
    validate_options(options)?;
    extract_ppc(&PdfDocument::open(input_pdf, options)?, options)
}

pub fn extract_schedules_from_pdf(
    input_pdf: &Path,
    options: &ExtractOptions,
) -> Result<ScheduleReport, ExtractError> {
    validate_options(options)?;
    extract_schedules(&PdfDocument::open(input_pdf, options)?, options)
}

pub fn chunk_pdf(
    input_pdf: &Path,
    options: &ExtractOptions,
    metadata: &DocumentMetadata,
) -> Result<ChunkReport, ExtractError> {
    chunk_document(&PdfDocument::open(input_pdf, options)?, options, metadata)
}
