use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static CHAPTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)cap[íi]tulo\s+([ivx\d]+)").expect("hardcoded chapter regex is valid")
});
static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)se[çc][ãa]o\s+([\d.]+)").expect("hardcoded section regex is valid")
});
static ARTICLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)art(?:igo)?\s+(\d+º?)").expect("hardcoded article regex is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Chunk {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    pub chapter: Option<String>,
    pub section: Option<String>,
    pub article: Option<String>,
    pub text: String,
}

enum Marker {
    Chapter(String),
    Section(String),
    Article(String),
}

fn find_marker(line: &str) -> Option<Marker> {
    if let Some(found) = CHAPTER_RE.find(line) {
        return Some(Marker::Chapter(found.as_str().to_string()));
    }
    if let Some(found) = SECTION_RE.find(line) {
        return Some(Marker::Section(found.as_str().to_string()));
    }
    ARTICLE_RE
        .find(line)
        .map(|found| Marker::Article(found.as_str().to_string()))
}

/// Line accumulator carrying the active structural labels.
///
/// A marker line closes the buffered chunk under the labels that were active
/// before it, then starts the next buffer.
#[derive(Debug, Default)]
pub struct StructureChunker {
    chapter: Option<String>,
    section: Option<String>,
    article: Option<String>,
    buffer: Vec<String>,
    chunks: Vec<Chunk>,
}

impl StructureChunker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        if let Some(marker) = find_marker(line) {
            self.flush();
            match marker {
                Marker::Chapter(label) => {
                    self.chapter = Some(label);
                    self.section = None;
                    self.article = None;
                }
                Marker::Section(label) => {
                    self.section = Some(label);
                    self.article = None;
                }
                Marker::Article(label) => self.article = Some(label),
            }
        }
        self.buffer.push(line.to_string());
    }

    fn flush(&mut self) {
        let text = self.buffer.join("\n").trim().to_string();
        self.buffer.clear();
        if text.is_empty() {
            return;
        }
        self.chunks.push(Chunk {
            page_number: None,
            chapter: self.chapter.clone(),
            section: self.section.clone(),
            article: self.article.clone(),
            text,
        });
    }

    #[must_use]
    pub fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

#[must_use]
pub fn chunk_text(text: &str) -> Vec<Chunk> {
    let mut chunker = StructureChunker::new();
    for line in text.lines() {
        chunker.push_line(line);
    }
    chunker.finish()
}
