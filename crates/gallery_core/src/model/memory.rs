//! Memory record model.
//!
//! # Responsibility
//! - Define the three record shapes (photo, video, journal entry).
//! - Provide a kind-tagged owned record and a borrowed view over any kind.
//!
//! # Invariants
//! - `id` is unique within its collection once a record is stored.
//! - `date` is kept exactly as entered; parsing happens only for ordering and
//!   display, never on write.
//! - `tags` keep entry order.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier allocated by the store's monotonic counter.
pub type MemoryId = u64;

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryKind {
    Photo,
    Video,
    Journal,
}

impl MemoryKind {
    /// All kinds in collection order.
    pub const ALL: [MemoryKind; 3] = [MemoryKind::Photo, MemoryKind::Video, MemoryKind::Journal];

    /// Stable lowercase name used in logs and wire output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Journal => "journal",
        }
    }

    /// Capitalized name used in user-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Photo => "Photo",
            Self::Video => "Video",
            Self::Journal => "Journal",
        }
    }

    /// Parses singular or plural kind names, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "photo" | "photos" => Some(Self::Photo),
            "video" | "videos" => Some(Self::Video),
            "journal" | "journals" => Some(Self::Journal),
            _ => None,
        }
    }
}

impl Display for MemoryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Photo memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: MemoryId,
    pub title: String,
    pub date: String,
    /// Image URI.
    pub image: String,
    pub caption: String,
    pub tags: Vec<String>,
    pub category: String,
}

/// Video memory. `url` is an embeddable URI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Video {
    pub id: MemoryId,
    pub title: String,
    pub date: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: String,
}

/// Free-text journal entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalEntry {
    pub id: MemoryId,
    pub title: String,
    pub date: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: String,
}

/// Fields shared by every memory shape.
///
/// `body` is the kind-specific free text: caption, description, or content.
pub trait Memory {
    fn kind(&self) -> MemoryKind;
    fn id(&self) -> MemoryId;
    fn set_id(&mut self, id: MemoryId);
    fn title(&self) -> &str;
    fn date(&self) -> &str;
    fn body(&self) -> &str;
    fn tags(&self) -> &[String];
    fn category(&self) -> &str;
}

impl Memory for Photo {
    fn kind(&self) -> MemoryKind {
        MemoryKind::Photo
    }
    fn id(&self) -> MemoryId {
        self.id
    }
    fn set_id(&mut self, id: MemoryId) {
        self.id = id;
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn body(&self) -> &str {
        &self.caption
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn category(&self) -> &str {
        &self.category
    }
}

impl Memory for Video {
    fn kind(&self) -> MemoryKind {
        MemoryKind::Video
    }
    fn id(&self) -> MemoryId {
        self.id
    }
    fn set_id(&mut self, id: MemoryId) {
        self.id = id;
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn body(&self) -> &str {
        &self.description
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn category(&self) -> &str {
        &self.category
    }
}

impl Memory for JournalEntry {
    fn kind(&self) -> MemoryKind {
        MemoryKind::Journal
    }
    fn id(&self) -> MemoryId {
        self.id
    }
    fn set_id(&mut self, id: MemoryId) {
        self.id = id;
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn body(&self) -> &str {
        &self.content
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn category(&self) -> &str {
        &self.category
    }
}

/// Owned record of any kind.
///
/// Serialized with a `type` discriminator so mixed lists stay self-describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MemoryRecord {
    Photo(Photo),
    Video(Video),
    Journal(JournalEntry),
}

impl MemoryRecord {
    pub fn kind(&self) -> MemoryKind {
        self.as_memory().kind()
    }

    pub fn id(&self) -> MemoryId {
        self.as_memory().id()
    }

    pub fn title(&self) -> &str {
        self.as_memory().title()
    }

    pub fn date(&self) -> &str {
        self.as_memory().date()
    }

    pub fn set_id(&mut self, id: MemoryId) {
        match self {
            Self::Photo(photo) => photo.set_id(id),
            Self::Video(video) => video.set_id(id),
            Self::Journal(journal) => journal.set_id(id),
        }
    }

    /// Borrows this record as a [`MemoryRef`].
    pub fn as_memory_ref(&self) -> MemoryRef<'_> {
        match self {
            Self::Photo(photo) => MemoryRef::Photo(photo),
            Self::Video(video) => MemoryRef::Video(video),
            Self::Journal(journal) => MemoryRef::Journal(journal),
        }
    }

    fn as_memory(&self) -> &dyn Memory {
        match self {
            Self::Photo(photo) => photo,
            Self::Video(video) => video,
            Self::Journal(journal) => journal,
        }
    }
}

/// Borrowed view over a stored record of any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRef<'a> {
    Photo(&'a Photo),
    Video(&'a Video),
    Journal(&'a JournalEntry),
}

impl<'a> MemoryRef<'a> {
    pub fn kind(&self) -> MemoryKind {
        self.as_memory().kind()
    }

    pub fn id(&self) -> MemoryId {
        self.as_memory().id()
    }

    pub fn title(&self) -> &'a str {
        self.as_memory().title()
    }

    pub fn date(&self) -> &'a str {
        self.as_memory().date()
    }

    pub fn body(&self) -> &'a str {
        self.as_memory().body()
    }

    pub fn tags(&self) -> &'a [String] {
        self.as_memory().tags()
    }

    pub fn category(&self) -> &'a str {
        self.as_memory().category()
    }

    /// Calendar date used for ordering; `None` when `date` does not parse.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_memory_date(self.date())
    }

    /// Case-insensitive substring match over title and body.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title().to_lowercase().contains(needle) || self.body().to_lowercase().contains(needle)
    }

    /// Clones the referenced record into an owned [`MemoryRecord`].
    pub fn to_record(&self) -> MemoryRecord {
        match *self {
            Self::Photo(photo) => MemoryRecord::Photo(photo.clone()),
            Self::Video(video) => MemoryRecord::Video(video.clone()),
            Self::Journal(journal) => MemoryRecord::Journal(journal.clone()),
        }
    }

    fn as_memory(&self) -> &'a dyn Memory {
        match *self {
            Self::Photo(photo) => photo,
            Self::Video(video) => video,
            Self::Journal(journal) => journal,
        }
    }
}

/// Parses a stored date string.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (date part only). Anything
/// else yields `None`.
pub fn parse_memory_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.date_naive())
}

#[cfg(test)]
mod tests {
    use super::{parse_memory_date, JournalEntry, MemoryKind, MemoryRecord, Photo};
    use chrono::NaiveDate;

    #[test]
    fn kind_parse_accepts_plural_and_case() {
        assert_eq!(MemoryKind::parse("Photos"), Some(MemoryKind::Photo));
        assert_eq!(MemoryKind::parse(" journal "), Some(MemoryKind::Journal));
        assert_eq!(MemoryKind::parse("album"), None);
    }

    #[test]
    fn parse_memory_date_handles_plain_and_rfc3339() {
        let expected = NaiveDate::from_ymd_opt(2023, 7, 15).unwrap();
        assert_eq!(parse_memory_date("2023-07-15"), Some(expected));
        assert_eq!(parse_memory_date("2023-07-15T08:30:00Z"), Some(expected));
        assert_eq!(parse_memory_date("July 15"), None);
        assert_eq!(parse_memory_date(""), None);
    }

    #[test]
    fn matches_text_checks_title_and_body() {
        let journal = JournalEntry {
            title: "Park Day".to_string(),
            content: "The kids played on the SWINGS".to_string(),
            ..JournalEntry::default()
        };
        let record = MemoryRecord::Journal(journal);
        assert!(record.as_memory_ref().matches_text("park"));
        assert!(record.as_memory_ref().matches_text("swings"));
        assert!(!record.as_memory_ref().matches_text("beach"));
    }

    #[test]
    fn set_id_reaches_inner_record() {
        let mut record = MemoryRecord::Photo(Photo::default());
        record.set_id(42);
        assert_eq!(record.id(), 42);
        assert_eq!(record.kind(), MemoryKind::Photo);
    }
}
