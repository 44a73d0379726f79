use std::collections::{BTreeMap, BTreeSet};
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ExtractError;

fn parse_page_number(token: &str, what: &str) -> Result<u32, String> {
    let page: u32 = token
        .trim()
        .parse()
        .map_err(|_| format!("invalid {what}: '{}'", token.trim()))?;
    if page == 0 {
        return Err("pages are 1-based".to_string());
    }
    Ok(page)
}

fn parse_span(token: &str) -> Result<RangeInclusive<u32>, String> {
    if let Some((start, end)) = token.split_once('-') {
        let start = parse_page_number(start, "page range start")?;
        let end = parse_page_number(end, "page range end")?;
        if end < start {
            return Err(format!(
                "invalid range '{token}': end is smaller than start"
            ));
        }
        Ok(start..=end)
    } else {
        let page = parse_page_number(token, "page number")?;
        Ok(page..=page)
    }
}

/// Set of 1-based page numbers, parsed from `"1-3,5"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    pages: BTreeSet<u32>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.pages.contains(&page)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.iter().copied()
    }
}

impl FromStr for PageSelection {
    type Err = ExtractError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut pages = BTreeSet::new();
        for token in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            pages.extend(parse_span(token).map_err(ExtractError::InvalidPageSelection)?);
        }

        if pages.is_empty() {
            return Err(ExtractError::InvalidPageSelection(
                "page selection cannot be empty".to_string(),
            ));
        }

        Ok(Self { pages })
    }
}

impl FromIterator<u32> for PageSelection {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        (self.start..=self.end).contains(&page)
    }
}

impl FromStr for PageRange {
    type Err = ExtractError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let span = parse_span(spec.trim()).map_err(ExtractError::InvalidPageSelection)?;
        Ok(Self::new(*span.start(), *span.end()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListOverride<T> {
    #[default]
    Default,
    Replace(Vec<T>),
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(values) => values.clone(),
            ListOverride::Extend(values) => {
                let mut resolved = defaults.to_vec();
                resolved.extend(values.iter().cloned());
                resolved
            }
        }
    }
}

/// Page-number overrides used by the table classifier for pages whose
/// continuation tables lack the usual header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub elective_override_pages: PageRange,
    pub elective_override_keywords: Vec<String>,
    pub faculty_special_pages: Vec<u32>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            elective_override_pages: PageRange::new(25, 28),
            elective_override_keywords: vec![
                "tópicos especiais".to_string(),
                "algoritmos geométricos".to_string(),
            ],
            faculty_special_pages: vec![97, 98],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Heading that precedes the class group on schedule pages.
    pub program_heading: String,
    pub metadata_scan_lines: usize,
    pub room_patterns: ListOverride<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            program_heading: "CIÊNCIA DA COMPUTAÇÃO".to_string(),
            metadata_scan_lines: 15,
            room_patterns: ListOverride::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub pages: Option<PageSelection>,
    pub min_cols: usize,
    pub classifier: ClassifierConfig,
    pub schedule: ScheduleConfig,
    pub dedup_min_length: usize,
    /// Acronym expansions applied to chunk text before it is normalized.
    pub acronyms: BTreeMap<String, String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            pages: None,
            min_cols: 2,
            classifier: ClassifierConfig::default(),
            schedule: ScheduleConfig::default(),
            dedup_min_length: 50,
            acronyms: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ListOverride, PageRange, PageSelection};
    use crate::error::ExtractError;
    use std::str::FromStr;

    #[test]
    fn parse_page_selection_range_and_single() {
        let selection = PageSelection::from_str("1-3,5").expect("selection should parse");
        assert!(selection.contains(1));
        assert!(selection.contains(3));
        assert!(selection.contains(5));
        assert!(!selection.contains(4));
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![1, 2, 3, 5]);
    }

    #[test]
    fn reject_invalid_page_selection() {
        let err = PageSelection::from_str("3-1").expect_err("invalid range should fail");
        assert!(matches!(err, ExtractError::InvalidPageSelection(_)));
        assert!(err.to_string().contains("invalid range"));

        let err = PageSelection::from_str("0").expect_err("zero page should fail");
        assert!(err.to_string().contains("1-based"));

        let err = PageRange::from_str("9-x").expect_err("bad range end should fail");
        assert!(err.to_string().contains("invalid page range end"));
    }

    #[test]
    fn parse_page_range_bounds_are_inclusive() {
        let range = PageRange::from_str("25-28").expect("range should parse");
        assert!(range.contains(25));
        assert!(range.contains(28));
        assert!(!range.contains(29));

        let single = PageRange::from_str("7").expect("single page should parse");
        assert_eq!(single, PageRange::new(7, 7));
    }

    #[test]
    fn list_override_extends_defaults() {
        let defaults = vec!["a".to_string()];
        let extended = ListOverride::Extend(vec!["b".to_string()]).resolve(&defaults);
        assert_eq!(extended, vec!["a", "b"]);

        let replaced = ListOverride::Replace(vec!["c".to_string()]).resolve(&defaults);
        assert_eq!(replaced, vec!["c"]);
    }
}
