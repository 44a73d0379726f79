use once_cell::sync::Lazy;
use regex::{Match, Regex};

use crate::error::ExtractError;
use crate::model::{ScheduleCell, ScheduleRow};
use crate::options::ScheduleConfig;
use crate::text::{clean_cell, collapse_whitespace};

/// Room patterns from most to least specific.
pub const DEFAULT_ROOM_PATTERNS: &[&str] = &[
    r"P\d\s*[-–—]?\s*Sala\s*\d+",
    r"LabCC\s*[-–—]?\s*P\d",
    r"LabRedes\s*[-–—]?\s*P\d",
    r"Sala\s*\d+",
    r"LabCC",
    r"LabRedes",
];

static INSTRUCTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]+)\)").expect("hardcoded instructor regex is valid"));
static BUILDING_ROOM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)P\d\s*[-–—]?\s*Sala\s*\d+").expect("hardcoded building room regex is valid")
});
static BARE_ROOM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Sala\s*\d+").expect("hardcoded room regex is valid"));
static DEFAULT_MATCHER: Lazy<RoomMatcher> = Lazy::new(|| {
    RoomMatcher::new(DEFAULT_ROOM_PATTERNS).expect("hardcoded room patterns are valid")
});

#[derive(Debug, Clone)]
pub struct RoomMatcher {
    patterns: Vec<Regex>,
}

impl RoomMatcher {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ExtractError> {
        let patterns = patterns
            .iter()
            .map(|pattern| Regex::new(&format!("(?i){}", pattern.as_ref())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn from_config(config: &ScheduleConfig) -> Result<Self, ExtractError> {
        let defaults = DEFAULT_ROOM_PATTERNS
            .iter()
            .map(|pattern| (*pattern).to_string())
            .collect::<Vec<_>>();
        Self::new(&config.room_patterns.resolve(&defaults))
    }

    /// The room at the end of `text`: for each pattern in priority order the
    /// rightmost match is taken, and accepted only if at most one character
    /// follows it.
    fn find_trailing<'t>(&self, text: &'t str) -> Option<Match<'t>> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .find_iter(text)
                .last()
                .filter(|found| text[found.end()..].chars().count() <= 1)
        })
    }
}

impl Default for RoomMatcher {
    fn default() -> Self {
        DEFAULT_MATCHER.clone()
    }
}

#[must_use]
pub fn parse_cell(raw: Option<&str>, rooms: &RoomMatcher) -> ScheduleCell {
    let Some(mut text) = clean_cell(raw) else {
        return ScheduleCell::default();
    };

    let mut instructor = None;
    if let Some(captures) = INSTRUCTOR_RE.captures(&text) {
        instructor = captures.get(1).and_then(|name| clean_cell(Some(name.as_str())));
        let whole = captures.get(0).map_or(0..0, |found| found.range());
        text = format!("{}{}", &text[..whole.start], &text[whole.end..])
            .trim()
            .to_string();
    }

    let mut room = None;
    if let Some(found) = rooms.find_trailing(&text) {
        room = Some(collapse_whitespace(found.as_str()));
        text = text[..found.start()].trim().to_string();
    }

    let course = text.trim_matches(|ch| ch == ' ' || ch == '-');
    ScheduleCell {
        course: (!course.is_empty()).then(|| course.to_string()),
        instructor,
        room,
    }
}

/// Single room used for cells that name no room of their own.
#[must_use]
pub fn default_room(rooms_info: Option<&str>) -> Option<String> {
    let rooms_info = rooms_info?;

    if let Some(found) = BUILDING_ROOM_RE
        .find(rooms_info)
        .or_else(|| BARE_ROOM_RE.find(rooms_info))
    {
        return Some(collapse_whitespace(found.as_str()));
    }

    let first_part = rooms_info.split(',').next().unwrap_or_default().trim();
    (first_part.chars().count() > 2 && !first_part.to_lowercase().contains("indicado"))
        .then(|| first_part.to_string())
}

/// Fills the room of every cell that has a course but no room.
pub fn backfill_room(rows: &mut [ScheduleRow], room: &str) {
    for cell in rows.iter_mut().flat_map(|row| row.days.values_mut()) {
        if cell.course.is_some() && cell.room.is_none() {
            cell.room = Some(room.to_string());
        }
    }
}
