//! Content Catalog Module
//!
//! Validated, immutable collections of the site's content records and the
//! queries pages run against them.
//!
//! ## Components
//! 1. Schema Validator - raw JSON record to typed record (`validate`)
//! 2. Catalog Store - indexed, read-only collection per kind (`store`)
//! 3. Query Engine - sorting, featured, related, filters (`query`)
//! 4. Static Path Enumerator - every addressable page (`paths`)
//! 5. Site Catalog - the three kinds loaded from a data directory (`site`)

pub mod error;
pub mod types;
pub mod validate;
pub mod store;
pub mod query;
pub mod paths;
pub mod site;

pub use error::{DuplicateKeyError, KeyField, LoadError, NotFoundError, RecordRef, ValidationError, ValidationIssue};
pub use types::{
    CatalogRecord, ContentDate, Guest, InterviewRecord, Link, MediaKind, Metric, PlayRecord, RecordKind,
    WorkRecord,
};
pub use store::{Catalog, LoadPolicy};
pub use query::ListFilters;
pub use paths::{all_slugs, Route};
pub use site::SiteCatalog;
