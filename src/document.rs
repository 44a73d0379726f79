use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ExtractError;
use crate::model::{PageText, RawTable};
use crate::options::ExtractOptions;
use crate::pdf_reader::read_pdf_pages;
use crate::table_detect::detect_tables_in_page;

pub trait PageSource {
    /// 1-based page numbers in document order.
    fn page_numbers(&self) -> Vec<u32>;
}

pub trait TableSource: PageSource {
    fn get_tables(&self, page_number: u32) -> Result<Vec<RawTable>, ExtractError>;
}

pub trait PageTextSource: PageSource {
    fn page_text(&self, page_number: u32) -> Result<String, ExtractError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StaticPage {
    text: String,
    tables: Vec<RawTable>,
}

/// In-memory document, for callers that run their own table detector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticDocument {
    pages: BTreeMap<u32, StaticPage>,
}

impl StaticDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(
        mut self,
        page_number: u32,
        text: impl Into<String>,
        tables: Vec<RawTable>,
    ) -> Self {
        self.pages.insert(
            page_number,
            StaticPage {
                text: text.into(),
                tables,
            },
        );
        self
    }

    fn page(&self, page_number: u32) -> Result<&StaticPage, ExtractError> {
        self.pages
            .get(&page_number)
            .ok_or(ExtractError::PageOutOfRange(page_number))
    }
}

impl PageSource for StaticDocument {
    fn page_numbers(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }
}

impl TableSource for StaticDocument {
    fn get_tables(&self, page_number: u32) -> Result<Vec<RawTable>, ExtractError> {
        Ok(self.page(page_number)?.tables.clone())
    }
}

impl PageTextSource for StaticDocument {
    fn page_text(&self, page_number: u32) -> Result<String, ExtractError> {
        Ok(self.page(page_number)?.text.clone())
    }
}

/// A PDF read once up front; tables are detected from page text on demand.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pages: BTreeMap<u32, PageText>,
    min_cols: usize,
}

impl PdfDocument {
    pub fn open(path: &Path, options: &ExtractOptions) -> Result<Self, ExtractError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes, options)
    }

    pub fn from_bytes(input_pdf: &[u8], options: &ExtractOptions) -> Result<Self, ExtractError> {
        let pages = read_pdf_pages(input_pdf, options.pages.as_ref())?
            .into_iter()
            .map(|page| (page.page_number, page))
            .collect::<BTreeMap<_, _>>();

        if pages.values().all(|page| page.text.trim().is_empty()) {
            return Err(ExtractError::PdfExtract(
                "no text could be extracted from the selected pages".to_string(),
            ));
        }

        tracing::info!(pages = pages.len(), "PDF text loaded");
        Ok(Self {
            pages,
            min_cols: options.min_cols,
        })
    }

    fn page(&self, page_number: u32) -> Result<&PageText, ExtractError> {
        self.pages
            .get(&page_number)
            .ok_or(ExtractError::PageOutOfRange(page_number))
    }
}

impl PageSource for PdfDocument {
    fn page_numbers(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }
}

impl TableSource for PdfDocument {
    fn get_tables(&self, page_number: u32) -> Result<Vec<RawTable>, ExtractError> {
        Ok(detect_tables_in_page(self.page(page_number)?, self.min_cols))
    }
}

impl PageTextSource for PdfDocument {
    fn page_text(&self, page_number: u32) -> Result<String, ExtractError> {
        Ok(self.page(page_number)?.text.clone())
    }
}
