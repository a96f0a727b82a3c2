//! Catalog Store
//!
//! Owns the validated records of one kind in source order, with O(1) lookup
//! by `slug` and by `id`. A `Catalog` is never mutated after `load`, so any
//! number of readers can share it (behind an `Arc`) without locking.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::catalog::error::{DuplicateKeyError, KeyField, LoadError, NotFoundError, ValidationError};
use crate::catalog::types::{CatalogRecord, RecordKind};

/// What to do when a record fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Validate every record and report all failures together.
    #[default]
    CollectAll,
    /// Stop at the first invalid record.
    FailFast,
}

impl std::str::FromStr for LoadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collect-all" | "collect_all" | "collectall" => Ok(LoadPolicy::CollectAll),
            "fail-fast" | "fail_fast" | "failfast" => Ok(LoadPolicy::FailFast),
            other => Err(format!(
                "unknown load policy '{}' (expected collect-all or fail-fast)",
                other
            )),
        }
    }
}

/// Immutable, validated, indexed collection of one record kind.
#[derive(Debug, Clone)]
pub struct Catalog<R> {
    records: Vec<R>,
    by_slug: FxHashMap<String, usize>,
    by_id: FxHashMap<String, usize>,
}

impl<R: CatalogRecord> Catalog<R> {
    /// Validate and index raw records with the default (collect-all) policy.
    pub fn load(raw_records: &[Value]) -> Result<Self, LoadError> {
        Self::load_with_policy(raw_records, LoadPolicy::default())
    }

    pub fn load_with_policy(raw_records: &[Value], policy: LoadPolicy) -> Result<Self, LoadError> {
        let mut records = Vec::with_capacity(raw_records.len());
        let mut errors: Vec<ValidationError> = Vec::new();

        for (idx, raw) in raw_records.iter().enumerate() {
            match R::validate(raw, idx) {
                Ok(record) => records.push(record),
                Err(e) => {
                    errors.push(e);
                    if policy == LoadPolicy::FailFast {
                        break;
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(LoadError::Invalid(errors));
        }

        Ok(Self::from_records(records)?)
    }

    /// Index already-typed records. Fails on the first repeated `id` or `slug`.
    pub fn from_records(records: Vec<R>) -> Result<Self, DuplicateKeyError> {
        let mut by_slug = FxHashMap::default();
        let mut by_id = FxHashMap::default();

        for (idx, record) in records.iter().enumerate() {
            if let Some(&first) = by_id.get(record.id()) {
                return Err(duplicate::<R>(KeyField::Id, record.id(), first, idx));
            }
            if let Some(&first) = by_slug.get(record.slug()) {
                return Err(duplicate::<R>(KeyField::Slug, record.slug(), first, idx));
            }
            by_id.insert(record.id().to_string(), idx);
            by_slug.insert(record.slug().to_string(), idx);
        }

        Ok(Self {
            records,
            by_slug,
            by_id,
        })
    }

    pub fn kind(&self) -> RecordKind {
        R::KIND
    }

    /// Records in source order. Source order carries no sort meaning.
    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn get_by_slug(&self, slug: &str) -> Result<&R, NotFoundError> {
        self.by_slug
            .get(slug)
            .map(|&idx| &self.records[idx])
            .ok_or_else(|| NotFoundError::record(R::KIND, slug))
    }

    pub fn get_by_id(&self, id: &str) -> Option<&R> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn contains_slug(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// Position of a record in source order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn duplicate<R: CatalogRecord>(key: KeyField, value: &str, first: usize, second: usize) -> DuplicateKeyError {
    DuplicateKeyError {
        kind: R::KIND,
        key,
        value: value.to_string(),
        first,
        second,
    }
}
