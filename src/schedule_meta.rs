use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ExtractError;
use crate::options::ScheduleConfig;

static SEMESTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+/\d{4}\s*$").expect("hardcoded semester regex is valid"));
static ROOMS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SALAS?:\s*(.+)").expect("hardcoded rooms regex is valid"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScheduleMetadata {
    pub semester: Option<String>,
    pub class_group: Option<String>,
    pub rooms_info: Option<String>,
}

impl ScheduleMetadata {
    fn is_complete(&self) -> bool {
        self.semester.is_some() && self.class_group.is_some() && self.rooms_info.is_some()
    }
}

/// Reads semester, class group and room notes from the heading lines of a
/// schedule page.
#[derive(Debug, Clone)]
pub struct MetadataScanner {
    class_group_re: Regex,
    scan_lines: usize,
}

impl MetadataScanner {
    pub fn new(config: &ScheduleConfig) -> Result<Self, ExtractError> {
        let class_group_re = Regex::new(&format!(
            r"(?i){}\s*[-–—]\s*(.+)",
            regex::escape(&config.program_heading)
        ))?;
        Ok(Self {
            class_group_re,
            scan_lines: config.metadata_scan_lines,
        })
    }

    /// Each line fills at most one field; the first hit per field wins.
    #[must_use]
    pub fn scan(&self, page_text: &str) -> ScheduleMetadata {
        let mut metadata = ScheduleMetadata::default();

        for line in page_text.lines().take(self.scan_lines).map(str::trim) {
            if metadata.semester.is_none() && SEMESTER_RE.is_match(line) {
                metadata.semester = Some(line.to_string());
            } else if metadata.class_group.is_none() && self.class_group_re.is_match(line) {
                metadata.class_group = first_group(&self.class_group_re, line);
            } else if metadata.rooms_info.is_none() && ROOMS_RE.is_match(line) {
                metadata.rooms_info = first_group(&ROOMS_RE, line);
            }

            if metadata.is_complete() {
                break;
            }
        }

        metadata
    }
}

fn first_group(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|found| found.as_str().trim().to_string())
}
