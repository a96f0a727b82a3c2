use std::fmt;

use thiserror::Error;

use crate::catalog::types::RecordKind;

/// Identifies the offending record inside its source array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    /// The record's own `id`, when it has a usable one.
    Id(String),
    /// Zero-based position in the source array.
    Index(usize),
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordRef::Id(id) => write!(f, "'{}'", id),
            RecordRef::Index(idx) => write!(f, "#{}", idx),
        }
    }
}

/// What was wrong with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    NotAnObject,
    Missing,
    WrongType { expected: &'static str },
    Empty,
    InvalidSlug,
    InvalidDate,
    InvalidUrl,
    ConflictingMedia,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NotAnObject => f.write_str("record is not a JSON object"),
            ValidationIssue::Missing => f.write_str("required field is missing"),
            ValidationIssue::WrongType { expected } => write!(f, "expected {}", expected),
            ValidationIssue::Empty => f.write_str("must not be empty"),
            ValidationIssue::InvalidSlug => f.write_str("slug must match ^[a-z0-9-]+$"),
            ValidationIssue::InvalidDate => f.write_str("not a valid calendar date"),
            ValidationIssue::InvalidUrl => f.write_str("not a valid absolute URL"),
            ValidationIssue::ConflictingMedia => {
                f.write_str("audioUrl and videoUrl are mutually exclusive")
            }
        }
    }
}

/// A malformed record. Fatal at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} {record}: field `{field}`: {issue}")]
pub struct ValidationError {
    pub kind: RecordKind,
    pub record: RecordRef,
    /// Dotted path of the failing field, e.g. `guest.name` or `links[2].url`.
    pub field: String,
    pub issue: ValidationIssue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    Id,
    Slug,
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyField::Id => f.write_str("id"),
            KeyField::Slug => f.write_str("slug"),
        }
    }
}

/// Two records of one kind share an `id` or a `slug`. Fatal at load time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate {kind} {key} '{value}' at records #{first} and #{second}")]
pub struct DuplicateKeyError {
    pub kind: RecordKind,
    pub key: KeyField,
    pub value: String,
    pub first: usize,
    pub second: usize,
}

/// A slug or route that does not resolve. Recoverable: render a 404.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe_not_found(.kind, .slug))]
pub struct NotFoundError {
    /// `None` when the route itself is unknown.
    pub kind: Option<RecordKind>,
    pub slug: String,
}

impl NotFoundError {
    pub fn record(kind: RecordKind, slug: &str) -> Self {
        Self {
            kind: Some(kind),
            slug: slug.to_string(),
        }
    }

    pub fn route(path: &str) -> Self {
        Self {
            kind: None,
            slug: path.to_string(),
        }
    }
}

fn describe_not_found(kind: &Option<RecordKind>, slug: &str) -> String {
    match kind {
        Some(kind) => format!("no {} with slug '{}'", kind, slug),
        None => format!("no route for '{}'", slug),
    }
}

/// Why a catalog could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("{} invalid record(s); first: {}", .0.len(), first_error(.0))]
    Invalid(Vec<ValidationError>),
    #[error(transparent)]
    Duplicate(#[from] DuplicateKeyError),
}

impl LoadError {
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            LoadError::Invalid(errors) => errors,
            LoadError::Duplicate(_) => &[],
        }
    }
}

fn first_error(errors: &[ValidationError]) -> String {
    errors
        .first()
        .map(|e| e.to_string())
        .unwrap_or_else(|| "none".to_string())
}
