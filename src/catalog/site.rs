//! Site catalog: the three collections loaded together.
//!
//! Expected directory structure from data_dir:
//!   - interviews.json (array of interview records)
//!   - work.json (array of case studies)
//!   - play.json (array of side projects)
//!
//! Loading either fully succeeds or fails startup; nothing is retried.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::catalog::error::{LoadError, NotFoundError};
use crate::catalog::paths::{detail_routes, Route};
use crate::catalog::store::{Catalog, LoadPolicy};
use crate::catalog::types::{CatalogRecord, InterviewRecord, PlayRecord, RecordKind, WorkRecord};

#[derive(Debug)]
pub struct SiteCatalog {
    interviews: Catalog<InterviewRecord>,
    work: Catalog<WorkRecord>,
    play: Catalog<PlayRecord>,
}

impl SiteCatalog {
    /// Load all collections from `data_dir`.
    pub fn load_from_dir(data_dir: impl AsRef<Path>, policy: LoadPolicy) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        tracing::info!("Loading content catalogs from {}", data_dir.display());

        let interviews = read_array(data_dir, RecordKind::Interview)?;
        let work = read_array(data_dir, RecordKind::Work)?;
        let play = read_array(data_dir, RecordKind::Play)?;

        Self::from_values(&interviews, &work, &play, policy)
    }

    /// Build from already-parsed JSON arrays.
    ///
    /// With `CollectAll` every kind is validated before failing, and the
    /// error carries the validation errors of all kinds together.
    pub fn from_values(interviews: &[Value], work: &[Value], play: &[Value], policy: LoadPolicy) -> Result<Self> {
        let mut failures = Vec::new();
        let interviews = load_kind(interviews, policy, &mut failures);
        let work = load_kind(work, policy, &mut failures);
        let play = load_kind(play, policy, &mut failures);

        let (Some(interviews), Some(work), Some(play)) = (interviews, work, play) else {
            return Err(combine_failures(failures));
        };

        let site = Self { interviews, work, play };

        tracing::info!(
            "Catalogs loaded: {} interviews, {} work, {} play",
            site.interviews.len(),
            site.work.len(),
            site.play.len()
        );

        Ok(site)
    }

    pub fn interviews(&self) -> &Catalog<InterviewRecord> {
        &self.interviews
    }

    pub fn work(&self) -> &Catalog<WorkRecord> {
        &self.work
    }

    pub fn play(&self) -> &Catalog<PlayRecord> {
        &self.play
    }

    fn contains(&self, kind: RecordKind, slug: &str) -> bool {
        match kind {
            RecordKind::Interview => self.interviews.contains_slug(slug),
            RecordKind::Work => self.work.contains_slug(slug),
            RecordKind::Play => self.play.contains_slug(slug),
        }
    }

    /// Map a request path to a page. Unknown paths and unknown slugs are
    /// both `NotFoundError`.
    pub fn resolve(&self, path: &str) -> Result<Route, NotFoundError> {
        let route = Route::parse(path).ok_or_else(|| NotFoundError::route(path))?;

        if let Route::Detail(kind, slug) = &route {
            if !self.contains(*kind, slug) {
                return Err(NotFoundError::record(*kind, slug));
            }
        }

        Ok(route)
    }

    /// Every page to pre-render: home, the three list pages, then each
    /// kind's detail pages in catalog order.
    pub fn static_routes(&self) -> Vec<String> {
        let mut routes = vec![Route::Home.path()];
        routes.extend(RecordKind::ALL.iter().map(|kind| Route::List(*kind).path()));
        routes.extend(detail_routes(&self.interviews));
        routes.extend(detail_routes(&self.work));
        routes.extend(detail_routes(&self.play));
        routes
    }
}

/// Load one kind, recording a failure instead of returning early.
/// Under `FailFast` nothing further is loaded once a kind has failed.
fn load_kind<R: CatalogRecord>(
    raw: &[Value],
    policy: LoadPolicy,
    failures: &mut Vec<(RecordKind, LoadError)>,
) -> Option<Catalog<R>> {
    if policy == LoadPolicy::FailFast && !failures.is_empty() {
        return None;
    }

    match Catalog::load_with_policy(raw, policy) {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            failures.push((R::KIND, e));
            None
        }
    }
}

/// Merge per-kind failures into one error. Validation errors of every kind
/// are reported together; a duplicate key is only the error when no record
/// failed validation.
fn combine_failures(failures: Vec<(RecordKind, LoadError)>) -> anyhow::Error {
    let kinds: Vec<&str> = failures.iter().map(|(kind, _)| kind.label()).collect();
    let context = match kinds.as_slice() {
        [kind] => format!("Failed to load {} catalog", kind),
        _ => format!("Failed to load {} catalogs", kinds.join(", ")),
    };

    let mut invalid = Vec::new();
    let mut duplicate = None;
    for (_, failure) in failures {
        match failure {
            LoadError::Invalid(errors) => invalid.extend(errors),
            LoadError::Duplicate(dup) => {
                tracing::warn!("{}", dup);
                duplicate.get_or_insert(dup);
            }
        }
    }
    for error in &invalid {
        tracing::warn!("{}", error);
    }

    let error = match duplicate {
        Some(dup) if invalid.is_empty() => LoadError::Duplicate(dup),
        _ => LoadError::Invalid(invalid),
    };
    anyhow::Error::new(error).context(context)
}

fn read_array(data_dir: &Path, kind: RecordKind) -> Result<Vec<Value>> {
    let path = data_dir.join(kind.data_file());

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;

    match value {
        Value::Array(items) => Ok(items),
        _ => bail!("{} must contain a JSON array of {} records", path.display(), kind),
    }
}
