//! Record types for the three content collections.
//!
//! Data sources:
//! - Interviews: data/interviews.json
//! - Work (case studies): data/work.json
//! - Play (side projects): data/play.json
//!
//! Records are plain data. They are only ever built by the schema validator
//! (`catalog::validate`), so every value of these types already satisfies the
//! per-field invariants (URL-safe slug, parseable date, absolute link URLs).

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::catalog::error::ValidationError;
use crate::catalog::validate;

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Interview,
    Work,
    Play,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Interview, RecordKind::Work, RecordKind::Play];

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Interview => "interview",
            RecordKind::Work => "work",
            RecordKind::Play => "play",
        }
    }

    /// URL segment of the list page, also the prefix of every detail route.
    pub fn route_segment(&self) -> &'static str {
        match self {
            RecordKind::Interview => "interviews",
            RecordKind::Work => "work",
            RecordKind::Play => "play",
        }
    }

    /// File name of the collection inside the data directory.
    pub fn data_file(&self) -> &'static str {
        match self {
            RecordKind::Interview => "interviews.json",
            RecordKind::Work => "work.json",
            RecordKind::Play => "play.json",
        }
    }

    pub fn from_route_segment(segment: &str) -> Option<Self> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.route_segment() == segment)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A publication date as authored, plus its parsed value for ordering.
///
/// Serializes back to the authored string: turning it into something
/// human-readable is the presentation layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDate {
    raw: String,
    instant: NaiveDateTime,
}

impl ContentDate {
    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp. Surrounding
    /// whitespace is dropped. Timestamps keep their authored wall-clock time,
    /// so the calendar day is the one written in the source.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let instant = if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            day.and_hms_opt(0, 0, 0)?
        } else if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            ts.naive_local()
        } else {
            return None;
        };

        Some(Self {
            raw: trimmed.to_string(),
            instant,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn day(&self) -> NaiveDate {
        self.instant.date()
    }

    /// Ordering key used by the date sorts.
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }
}

impl Serialize for ContentDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Labelled external link (`{label, url}` in the source data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// Headline number on a case study (`{label, value}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guest {
    pub name: String,
    pub company: String,
    pub role: String,
}

/// Recording attached to an interview. At most one of audio or video.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "lowercase")]
pub enum MediaKind {
    Audio(String),
    Video(String),
    #[default]
    None,
}

impl MediaKind {
    pub fn url(&self) -> Option<&str> {
        match self {
            MediaKind::Audio(url) | MediaKind::Video(url) => Some(url),
            MediaKind::None => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub guest: Guest,
    pub description: String,
    pub long_description: String,
    pub category: String,
    pub category_gradient: String,
    pub date: ContentDate,
    pub duration: String,
    pub media: MediaKind,
    pub thumbnail: String,
    pub featured: bool,
    pub tags: Vec<String>,
    pub links: Vec<Link>,
    pub transcript: Option<String>,
    pub key_takeaways: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    pub id: String,
    pub slug: String,
    pub company: String,
    pub project: String,
    pub description: String,
    pub long_description: String,
    pub impact: String,
    pub tags: Vec<String>,
    pub date: ContentDate,
    pub duration: String,
    pub role: String,
    pub team: Vec<String>,
    pub featured: bool,
    pub thumbnail: String,
    pub images: Vec<String>,
    pub metrics: Vec<Metric>,
    pub technologies: Vec<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub long_description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub type_gradient: String,
    pub date: ContentDate,
    pub featured: bool,
    pub thumbnail: String,
    pub images: Vec<String>,
    pub technologies: Vec<String>,
    pub links: Vec<Link>,
    pub tags: Vec<String>,
}

/// Behaviour shared by every record kind.
///
/// The store, query engine and path enumerator are written once against this
/// trait; the per-kind differences are the validator and `group_key`.
pub trait CatalogRecord: Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    /// Build a record from one element of the raw JSON array.
    fn validate(raw: &Value, index: usize) -> Result<Self, ValidationError>;

    fn id(&self) -> &str;
    fn slug(&self) -> &str;
    fn date(&self) -> &ContentDate;
    fn featured(&self) -> bool;
    fn tags(&self) -> &[String];

    /// Grouping field used for related items. `None` means the kind has no
    /// grouping and every other record counts as related.
    fn group_key(&self) -> Option<&str> {
        None
    }
}

impl CatalogRecord for InterviewRecord {
    const KIND: RecordKind = RecordKind::Interview;

    fn validate(raw: &Value, index: usize) -> Result<Self, ValidationError> {
        validate::interview(raw, index)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn date(&self) -> &ContentDate {
        &self.date
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn group_key(&self) -> Option<&str> {
        Some(&self.category)
    }
}

impl CatalogRecord for WorkRecord {
    const KIND: RecordKind = RecordKind::Work;

    fn validate(raw: &Value, index: usize) -> Result<Self, ValidationError> {
        validate::work(raw, index)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn date(&self) -> &ContentDate {
        &self.date
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl CatalogRecord for PlayRecord {
    const KIND: RecordKind = RecordKind::Play;

    fn validate(raw: &Value, index: usize) -> Result<Self, ValidationError> {
        validate::play(raw, index)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn date(&self) -> &ContentDate {
        &self.date
    }

    fn featured(&self) -> bool {
        self.featured
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}
