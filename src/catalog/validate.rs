//! Record Schema Validator
//!
//! Turns one untyped JSON value into a typed record, or a `ValidationError`
//! naming the record (its `id`, or its array index when the id is unusable)
//! and the first failing field. Pure: no I/O, no logging.
//!
//! Field names are the authored camelCase names of the JSON files.
//! Optional fields that are present but `null` count as absent.

use serde_json::{Map, Value};

use crate::catalog::error::{RecordRef, ValidationError, ValidationIssue};
use crate::catalog::types::{
    CatalogRecord, ContentDate, Guest, InterviewRecord, Link, MediaKind, Metric, PlayRecord,
    RecordKind, WorkRecord,
};

/// Validate a raw record of the given kind. Dispatches to the typed validators.
pub fn validate<R: CatalogRecord>(raw: &Value, index: usize) -> Result<R, ValidationError> {
    R::validate(raw, index)
}

/// `^[a-z0-9-]+$`
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

pub fn interview(raw: &Value, index: usize) -> Result<InterviewRecord, ValidationError> {
    let f = Fields::new(RecordKind::Interview, raw, index)?;

    let id = f.id()?;
    let slug = f.slug()?;
    let title = f.string("title")?;
    let guest = f.guest()?;
    let description = f.string("description")?;
    let long_description = f.string("longDescription")?;
    let category = f.string("category")?;
    let category_gradient = f.string("categoryGradient")?;
    let date = f.date()?;
    let duration = f.string("duration")?;
    let media = f.media()?;
    let thumbnail = f.string("thumbnail")?;
    let featured = f.bool("featured")?;
    let tags = f.strings("tags")?;
    let links = f.opt_links("links")?.unwrap_or_default();
    let transcript = f.opt_string("transcript")?;
    let key_takeaways = f.opt_strings("keyTakeaways")?.unwrap_or_default();

    Ok(InterviewRecord {
        id,
        slug,
        title,
        guest,
        description,
        long_description,
        category,
        category_gradient,
        date,
        duration,
        media,
        thumbnail,
        featured,
        tags,
        links,
        transcript,
        key_takeaways,
    })
}

pub fn work(raw: &Value, index: usize) -> Result<WorkRecord, ValidationError> {
    let f = Fields::new(RecordKind::Work, raw, index)?;

    Ok(WorkRecord {
        id: f.id()?,
        slug: f.slug()?,
        company: f.string("company")?,
        project: f.string("project")?,
        description: f.string("description")?,
        long_description: f.string("longDescription")?,
        impact: f.string("impact")?,
        tags: f.strings("tags")?,
        date: f.date()?,
        duration: f.string("duration")?,
        role: f.string("role")?,
        team: f.strings("team")?,
        featured: f.bool("featured")?,
        thumbnail: f.string("thumbnail")?,
        images: f.strings("images")?,
        metrics: f.opt_metrics("metrics")?.unwrap_or_default(),
        technologies: f.strings("technologies")?,
        links: f.opt_links("links")?.unwrap_or_default(),
    })
}

pub fn play(raw: &Value, index: usize) -> Result<PlayRecord, ValidationError> {
    let f = Fields::new(RecordKind::Play, raw, index)?;

    Ok(PlayRecord {
        id: f.id()?,
        slug: f.slug()?,
        title: f.string("title")?,
        description: f.string("description")?,
        long_description: f.string("longDescription")?,
        kind: f.string("type")?,
        type_gradient: f.string("typeGradient")?,
        date: f.date()?,
        featured: f.bool("featured")?,
        thumbnail: f.string("thumbnail")?,
        images: f.strings("images")?,
        technologies: f.strings("technologies")?,
        // Required for play, but may be empty.
        links: f.links("links")?,
        tags: f.strings("tags")?,
    })
}

// ============================================================================
// Field readers
// ============================================================================

struct Fields<'a> {
    kind: RecordKind,
    record: RecordRef,
    obj: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn new(kind: RecordKind, raw: &'a Value, index: usize) -> Result<Self, ValidationError> {
        let obj = raw.as_object().ok_or_else(|| ValidationError {
            kind,
            record: RecordRef::Index(index),
            field: String::new(),
            issue: ValidationIssue::NotAnObject,
        })?;

        let record = match obj.get("id").and_then(|v| v.as_str()) {
            Some(id) if !id.trim().is_empty() => RecordRef::Id(id.to_string()),
            _ => RecordRef::Index(index),
        };

        Ok(Self { kind, record, obj })
    }

    fn err(&self, field: impl Into<String>, issue: ValidationIssue) -> ValidationError {
        ValidationError {
            kind: self.kind,
            record: self.record.clone(),
            field: field.into(),
            issue,
        }
    }

    /// Present and non-null.
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    fn required(&self, key: &str) -> Result<&'a Value, ValidationError> {
        self.get(key)
            .ok_or_else(|| self.err(key, ValidationIssue::Missing))
    }

    fn string(&self, key: &str) -> Result<String, ValidationError> {
        let value = self.required(key)?;
        as_string(value).ok_or_else(|| self.err(key, expected("string")))
    }

    fn opt_string(&self, key: &str) -> Result<Option<String>, ValidationError> {
        self.get(key)
            .map(|v| as_string(v).ok_or_else(|| self.err(key, expected("string"))))
            .transpose()
    }

    fn bool(&self, key: &str) -> Result<bool, ValidationError> {
        self.required(key)?
            .as_bool()
            .ok_or_else(|| self.err(key, expected("boolean")))
    }

    fn strings(&self, key: &str) -> Result<Vec<String>, ValidationError> {
        let value = self.required(key)?;
        self.string_array(key, value)
    }

    fn opt_strings(&self, key: &str) -> Result<Option<Vec<String>>, ValidationError> {
        self.get(key)
            .map(|v| self.string_array(key, v))
            .transpose()
    }

    fn string_array(&self, key: &str, value: &Value) -> Result<Vec<String>, ValidationError> {
        let items = value
            .as_array()
            .ok_or_else(|| self.err(key, expected("array of strings")))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                as_string(item).ok_or_else(|| self.err(format!("{}[{}]", key, i), expected("string")))
            })
            .collect()
    }

    fn id(&self) -> Result<String, ValidationError> {
        let id = self.string("id")?;
        if id.trim().is_empty() {
            return Err(self.err("id", ValidationIssue::Empty));
        }
        Ok(id)
    }

    fn slug(&self) -> Result<String, ValidationError> {
        let slug = self.string("slug")?;
        if !is_url_safe_slug(&slug) {
            return Err(self.err("slug", ValidationIssue::InvalidSlug));
        }
        Ok(slug)
    }

    fn date(&self) -> Result<ContentDate, ValidationError> {
        let raw = self.string("date")?;
        ContentDate::parse(&raw).ok_or_else(|| self.err("date", ValidationIssue::InvalidDate))
    }

    fn guest(&self) -> Result<Guest, ValidationError> {
        let obj = self
            .required("guest")?
            .as_object()
            .ok_or_else(|| self.err("guest", expected("object")))?;

        let field = |key: &str| -> Result<String, ValidationError> {
            let path = format!("guest.{}", key);
            let value = obj
                .get(key)
                .filter(|v| !v.is_null())
                .ok_or_else(|| self.err(path.clone(), ValidationIssue::Missing))?;
            as_string(value).ok_or_else(|| self.err(path, expected("string")))
        };

        Ok(Guest {
            name: field("name")?,
            company: field("company")?,
            role: field("role")?,
        })
    }

    /// `audioUrl` / `videoUrl` collapse into one `MediaKind`.
    fn media(&self) -> Result<MediaKind, ValidationError> {
        let audio = self.opt_string("audioUrl")?.filter(|s| !s.trim().is_empty());
        let video = self.opt_string("videoUrl")?.filter(|s| !s.trim().is_empty());

        match (audio, video) {
            (Some(_), Some(_)) => Err(self.err("videoUrl", ValidationIssue::ConflictingMedia)),
            (Some(url), None) => Ok(MediaKind::Audio(url)),
            (None, Some(url)) => Ok(MediaKind::Video(url)),
            (None, None) => Ok(MediaKind::None),
        }
    }

    fn links(&self, key: &str) -> Result<Vec<Link>, ValidationError> {
        let value = self.required(key)?;
        self.link_array(key, value)
    }

    fn opt_links(&self, key: &str) -> Result<Option<Vec<Link>>, ValidationError> {
        self.get(key)
            .map(|v| self.link_array(key, v))
            .transpose()
    }

    fn link_array(&self, key: &str, value: &Value) -> Result<Vec<Link>, ValidationError> {
        let items = value
            .as_array()
            .ok_or_else(|| self.err(key, expected("array of links")))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let prefix = format!("{}[{}]", key, i);
                let (label, url) = self.pair(&prefix, item, "label", "url")?;
                if url::Url::parse(&url).is_err() {
                    return Err(self.err(format!("{}.url", prefix), ValidationIssue::InvalidUrl));
                }
                Ok(Link { label, url })
            })
            .collect()
    }

    fn opt_metrics(&self, key: &str) -> Result<Option<Vec<Metric>>, ValidationError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let items = value
            .as_array()
            .ok_or_else(|| self.err(key, expected("array of metrics")))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let prefix = format!("{}[{}]", key, i);
                let (label, value) = self.pair(&prefix, item, "label", "value")?;
                Ok(Metric { label, value })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Read a two-string object such as `{label, url}`.
    fn pair(
        &self,
        prefix: &str,
        item: &Value,
        first: &str,
        second: &str,
    ) -> Result<(String, String), ValidationError> {
        let obj = item
            .as_object()
            .ok_or_else(|| self.err(prefix, expected("object")))?;

        let read = |key: &str| -> Result<String, ValidationError> {
            let path = format!("{}.{}", prefix, key);
            let value = obj
                .get(key)
                .filter(|v| !v.is_null())
                .ok_or_else(|| self.err(path.clone(), ValidationIssue::Missing))?;
            as_string(value).ok_or_else(|| self.err(path, expected("string")))
        };

        Ok((read(first)?, read(second)?))
    }
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(|s| s.to_string())
}

fn expected(what: &'static str) -> ValidationIssue {
    ValidationIssue::WrongType { expected: what }
}
