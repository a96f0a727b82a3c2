//! Static Path Enumerator and route parsing.
//!
//! Addressable pages:
//! - `/` (home)
//! - `/interviews`, `/work`, `/play` (list pages)
//! - `/{segment}/{slug}` for every record (detail pages)
//!
//! The detail route set must be exhaustive: a slug missing from it would
//! not be pre-rendered and would 404 at runtime.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::catalog::store::Catalog;
use crate::catalog::types::{CatalogRecord, RecordKind};

/// Every slug of the catalog. Unique by construction of the store.
pub fn all_slugs<R: CatalogRecord>(catalog: &Catalog<R>) -> BTreeSet<String> {
    catalog.all().iter().map(|r| r.slug().to_string()).collect()
}

/// Detail paths of one kind, in catalog order.
pub fn detail_routes<R: CatalogRecord>(catalog: &Catalog<R>) -> Vec<String> {
    catalog
        .all()
        .iter()
        .map(|r| Route::Detail(R::KIND, r.slug().to_string()).path())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Route {
    Home,
    List(RecordKind),
    Detail(RecordKind, String),
}

impl Route {
    /// Recognise a site path. Query strings are not accepted; one trailing
    /// slash is. Slug syntax is not checked here, only catalog membership
    /// (see `SiteCatalog::resolve`).
    pub fn parse(path: &str) -> Option<Route> {
        if path == "/" {
            return Some(Route::Home);
        }

        let trimmed = path.strip_suffix('/').unwrap_or(path);
        let rest = trimmed.strip_prefix('/')?;
        let mut parts = rest.split('/');
        let kind = RecordKind::from_route_segment(parts.next()?)?;

        match (parts.next(), parts.next()) {
            (None, _) => Some(Route::List(kind)),
            (Some(slug), None) if !slug.is_empty() => Some(Route::Detail(kind, slug.to_string())),
            _ => None,
        }
    }

    /// Canonical path, without trailing slash.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::List(kind) => format!("/{}", kind.route_segment()),
            Route::Detail(kind, slug) => format!("/{}/{}", kind.route_segment(), slug),
        }
    }

    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Route::Home => None,
            Route::List(kind) | Route::Detail(kind, _) => Some(*kind),
        }
    }
}

/// Routes serialize as their canonical path.
impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::PlayRecord;
    use serde_json::json;

    fn play(id: &str, slug: &str) -> serde_json::Value {
        json!({
            "id": id, "slug": slug, "title": "", "description": "", "longDescription": "",
            "type": "", "typeGradient": "", "date": "2024-05-05", "featured": false,
            "thumbnail": "", "images": [], "technologies": [], "links": [], "tags": []
        })
    }

    #[test]
    fn test_all_slugs_exhaustive() {
        let catalog: Catalog<PlayRecord> =
            Catalog::load(&[play("1", "zeta"), play("2", "alpha"), play("3", "mid")]).unwrap();
        let slugs = all_slugs(&catalog);
        assert_eq!(slugs.len(), catalog.len());
        for record in catalog.all() {
            assert!(slugs.contains(&record.slug));
        }
    }

    #[test]
    fn test_detail_routes_in_catalog_order() {
        let catalog: Catalog<PlayRecord> = Catalog::load(&[play("1", "zeta"), play("2", "alpha")]).unwrap();
        assert_eq!(detail_routes(&catalog), vec!["/play/zeta", "/play/alpha"]);
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse("/interviews"), Some(Route::List(RecordKind::Interview)));
        assert_eq!(Route::parse("/work/"), Some(Route::List(RecordKind::Work)));
        assert_eq!(
            Route::parse("/play/dpp-linter"),
            Some(Route::Detail(RecordKind::Play, "dpp-linter".into()))
        );
        assert_eq!(
            Route::parse("/play/dpp-linter/"),
            Some(Route::Detail(RecordKind::Play, "dpp-linter".into()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        for path in ["", "blog", "/blog", "/play/a/b", "/interviews//", "//"] {
            assert_eq!(Route::parse(path), None, "{:?} should not parse", path);
        }
    }

    #[test]
    fn test_path_round_trip() {
        let routes = [
            Route::Home,
            Route::List(RecordKind::Play),
            Route::Detail(RecordKind::Interview, "ward-interview".into()),
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route.clone()));
        }
    }
}
