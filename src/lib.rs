//! HumanMachine Content Catalog
//!
//! Validated, read-only catalogs of the site's interviews, case studies and
//! side projects, with the queries and view models the pages are built from.
//!
//! - `catalog/`: schema validation, indexed stores, queries, static paths
//! - `presentation/`: view models and the builder that fills them
//! - `config`: environment configuration
//! - `api_server`: JSON API over the catalog (feature `api`)

pub mod catalog;
pub mod config;
pub mod presentation;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use catalog::{
    Catalog, CatalogRecord, InterviewRecord, ListFilters, LoadError, LoadPolicy, NotFoundError, PlayRecord,
    RecordKind, Route, SiteCatalog, ValidationError, WorkRecord,
};
pub use config::CatalogConfig;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
