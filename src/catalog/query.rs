//! Query Engine
//!
//! Display-ready views over a `Catalog`. Every function here is pure: it reads
//! the catalog and returns a fresh `Vec` of references, so the catalog's own
//! order never changes no matter how many views are taken from it.
//!
//! The only per-kind difference is the grouping key used by `related`
//! (`CatalogRecord::group_key`); `related_by` takes the extractor explicitly.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::catalog::error::NotFoundError;
use crate::catalog::store::Catalog;
use crate::catalog::types::CatalogRecord;

/// Newest first. Records sharing a date keep their source order.
pub fn sorted_by_date_descending<R: CatalogRecord>(catalog: &Catalog<R>) -> Vec<&R> {
    sort_by_date_descending(catalog.all().iter().collect())
}

/// Stable newest-first sort of an arbitrary selection.
pub fn sort_by_date_descending<R: CatalogRecord>(mut records: Vec<&R>) -> Vec<&R> {
    // slice::sort_by is stable; equal dates keep input order.
    records.sort_by(|a, b| b.date().instant().cmp(&a.date().instant()));
    records
}

/// Featured records, newest first.
pub fn featured<R: CatalogRecord>(catalog: &Catalog<R>) -> Vec<&R> {
    sort_by_date_descending(catalog.all().iter().filter(|r| r.featured()).collect())
}

/// First `n` items. Shorter input comes back whole.
pub fn top_n<T>(mut items: Vec<T>, n: usize) -> Vec<T> {
    items.truncate(n);
    items
}

/// The `n` newest records.
pub fn latest<R: CatalogRecord>(catalog: &Catalog<R>, n: usize) -> Vec<&R> {
    top_n(sorted_by_date_descending(catalog), n)
}

/// The `n` newest featured records.
pub fn featured_latest<R: CatalogRecord>(catalog: &Catalog<R>, n: usize) -> Vec<&R> {
    top_n(featured(catalog), n)
}

/// Related items for a detail page, using the kind's grouping key.
pub fn related<'a, R: CatalogRecord>(catalog: &'a Catalog<R>, current: &R, max_count: usize) -> Vec<&'a R> {
    related_by(catalog, current, max_count, R::group_key)
}

/// Records other than `current`, in catalog order, at most `max_count`.
///
/// When `group_key(current)` is `Some`, only records with the same key are
/// kept; when it is `None` every other record qualifies.
pub fn related_by<'a, R, K>(catalog: &'a Catalog<R>, current: &R, max_count: usize, group_key: K) -> Vec<&'a R>
where
    R: CatalogRecord,
    K: Fn(&R) -> Option<&str>,
{
    let group = group_key(current);
    catalog
        .all()
        .iter()
        .filter(|r| r.id() != current.id())
        .filter(|r| match group {
            Some(g) => group_key(*r) == Some(g),
            None => true,
        })
        .take(max_count)
        .collect()
}

/// Resolve a detail view. The error means "render not found", not a crash.
pub fn by_slug_or_not_found<'a, R: CatalogRecord>(catalog: &'a Catalog<R>, slug: &str) -> Result<&'a R, NotFoundError> {
    catalog.get_by_slug(slug)
}

/// Records in the given group, catalog order. Empty for kinds without groups.
pub fn by_category<'a, R: CatalogRecord>(catalog: &'a Catalog<R>, category: &str) -> Vec<&'a R> {
    catalog
        .all()
        .iter()
        .filter(|r| r.group_key() == Some(category))
        .collect()
}

/// Records carrying `tag` (exact match), catalog order.
pub fn with_tag<'a, R: CatalogRecord>(catalog: &'a Catalog<R>, tag: &str) -> Vec<&'a R> {
    catalog
        .all()
        .iter()
        .filter(|r| r.tags().iter().any(|t| t == tag))
        .collect()
}

/// Records dated within `[since, until]`; either bound may be open.
pub fn published_between<R: CatalogRecord>(
    catalog: &Catalog<R>,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Vec<&R> {
    catalog
        .all()
        .iter()
        .filter(|r| in_window(r.date().day(), since, until))
        .collect()
}

/// Distinct group keys in first-appearance order.
pub fn categories<R: CatalogRecord>(catalog: &Catalog<R>) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for key in catalog.all().iter().filter_map(|r| r.group_key()) {
        if !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen
}

fn in_window(day: NaiveDate, since: Option<NaiveDate>, until: Option<NaiveDate>) -> bool {
    since.map_or(true, |s| day >= s) && until.map_or(true, |u| day <= u)
}

/// Filters accepted by list views. All optional; they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListFilters {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured: Option<bool>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub limit: Option<usize>,
}

impl ListFilters {
    pub fn is_empty(&self) -> bool {
        *self == ListFilters::default()
    }

    /// Filter, then sort newest first, then truncate to `limit`.
    pub fn apply<'a, R: CatalogRecord>(&self, catalog: &'a Catalog<R>) -> Vec<&'a R> {
        let selected: Vec<&R> = catalog
            .all()
            .iter()
            .filter(|r| self.matches(*r))
            .collect();

        let sorted = sort_by_date_descending(selected);
        match self.limit {
            Some(n) => top_n(sorted, n),
            None => sorted,
        }
    }

    fn matches<R: CatalogRecord>(&self, record: &R) -> bool {
        if let Some(category) = &self.category {
            if record.group_key() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !record.tags().iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if record.featured() != featured {
                return false;
            }
        }
        in_window(record.date().day(), self.since, self.until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{InterviewRecord, WorkRecord};
    use serde_json::{json, Value};

    fn interview(id: &str, category: &str, date: &str, featured: bool) -> Value {
        json!({
            "id": id,
            "slug": format!("interview-{}", id),
            "title": format!("Interview {}", id),
            "guest": { "name": "n", "company": "c", "role": "r" },
            "description": "",
            "longDescription": "",
            "category": category,
            "categoryGradient": "",
            "date": date,
            "duration": "30 min",
            "thumbnail": "",
            "featured": featured,
            "tags": [category.to_lowercase()]
        })
    }

    fn work(id: &str, date: &str, featured: bool) -> Value {
        json!({
            "id": id,
            "slug": format!("work-{}", id),
            "company": "Acme",
            "project": format!("Project {}", id),
            "description": "",
            "longDescription": "",
            "impact": "",
            "tags": [],
            "date": date,
            "duration": "",
            "role": "",
            "team": [],
            "featured": featured,
            "thumbnail": "",
            "images": [],
            "technologies": []
        })
    }

    fn ids<R: CatalogRecord>(records: &[&R]) -> Vec<String> {
        records.iter().map(|r| r.id().to_string()).collect()
    }

    fn interviews() -> Catalog<InterviewRecord> {
        Catalog::load(&[
            interview("1", "Identity", "2024-03-01", false),
            interview("2", "Commerce", "2025-01-15", true),
            interview("3", "Identity", "2024-03-01", true),
            interview("4", "Identity", "2023-07-20", false),
            interview("5", "Design", "2025-06-30", true),
        ])
        .unwrap()
    }

    #[test]
    fn test_sorted_newest_first() {
        let catalog = interviews();
        let sorted = sorted_by_date_descending(&catalog);
        assert_eq!(ids(&sorted), vec!["5", "2", "1", "3", "4"]);
    }

    #[test]
    fn test_sort_is_stable_for_same_day() {
        let catalog: Catalog<InterviewRecord> = Catalog::load(&[
            interview("a", "Identity", "2024-01-01", false),
            interview("b", "Identity", "2024-01-01", false),
        ])
        .unwrap();
        assert_eq!(ids(&sorted_by_date_descending(&catalog)), vec!["a", "b"]);

        // Same dates listed the other way round keep that order too
        let reversed: Catalog<InterviewRecord> = Catalog::load(&[
            interview("b", "Identity", "2024-01-01", false),
            interview("a", "Identity", "2024-01-01", false),
        ])
        .unwrap();
        assert_eq!(ids(&sorted_by_date_descending(&reversed)), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let catalog = interviews();
        let once = sorted_by_date_descending(&catalog);
        let twice = sort_by_date_descending(once.clone());
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_queries_do_not_reorder_catalog() {
        let catalog = interviews();
        let _ = sorted_by_date_descending(&catalog);
        let _ = featured(&catalog);
        let order: Vec<&str> = catalog.all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_featured_sorted() {
        let catalog = interviews();
        assert_eq!(ids(&featured(&catalog)), vec!["5", "2", "3"]);
        assert_eq!(ids(&featured_latest(&catalog, 2)), vec!["5", "2"]);
    }

    #[test]
    fn test_top_n_shorter_input() {
        assert_eq!(top_n(vec![1, 2], 3), vec![1, 2]);
        assert_eq!(top_n(vec![1, 2, 3, 4], 3), vec![1, 2, 3]);
        assert!(top_n(Vec::<u8>::new(), 0).is_empty());
    }

    #[test]
    fn test_related_same_category_excludes_current() {
        let catalog = interviews();
        let current = catalog.get_by_id("1").unwrap();
        let rel = related(&catalog, current, 3);
        assert_eq!(ids(&rel), vec!["3", "4"]);
    }

    #[test]
    fn test_related_never_exceeds_max() {
        let raw: Vec<Value> = (0..11)
            .map(|i| work(&i.to_string(), "2024-01-01", false))
            .collect();
        let catalog: Catalog<WorkRecord> = Catalog::load(&raw).unwrap();
        let current = catalog.get_by_id("4").unwrap();

        let rel = related(&catalog, current, 3);
        assert_eq!(ids(&rel), vec!["0", "1", "2"]);
        assert!(rel.iter().all(|r| r.id != "4"));
    }

    #[test]
    fn test_related_work_ignores_grouping() {
        let catalog: Catalog<WorkRecord> = Catalog::load(&[
            work("a", "2024-01-01", false),
            work("b", "2022-01-01", true),
        ])
        .unwrap();
        let current = catalog.get_by_id("b").unwrap();
        assert_eq!(ids(&related(&catalog, current, 3)), vec!["a"]);
    }

    #[test]
    fn test_related_by_custom_key() {
        let catalog = interviews();
        let current = catalog.get_by_id("2").unwrap();
        let by_featured = related_by(&catalog, current, 5, |r: &InterviewRecord| {
            Some(if r.featured { "featured" } else { "regular" })
        });
        assert_eq!(ids(&by_featured), vec!["3", "5"]);
    }

    #[test]
    fn test_by_slug_or_not_found() {
        let catalog = interviews();
        assert_eq!(by_slug_or_not_found(&catalog, "interview-3").unwrap().id, "3");
        let err = by_slug_or_not_found(&catalog, "nonexistent").unwrap_err();
        assert_eq!(err.slug, "nonexistent");
    }

    #[test]
    fn test_category_tag_and_window_filters() {
        let catalog = interviews();
        assert_eq!(ids(&by_category(&catalog, "Identity")), vec!["1", "3", "4"]);
        assert_eq!(ids(&with_tag(&catalog, "design")), vec!["5"]);

        let since = NaiveDate::from_ymd_opt(2024, 1, 1);
        let until = NaiveDate::from_ymd_opt(2025, 1, 15);
        assert_eq!(ids(&published_between(&catalog, since, until)), vec!["1", "2", "3"]);
        assert_eq!(categories(&catalog), vec!["Identity", "Commerce", "Design"]);
    }

    #[test]
    fn test_list_filters_apply() {
        let catalog = interviews();
        let filters = ListFilters {
            category: Some("Identity".into()),
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&filters.apply(&catalog)), vec!["1", "3"]);

        let featured_only = ListFilters {
            featured: Some(true),
            ..Default::default()
        };
        assert_eq!(ids(&featured_only.apply(&catalog)), vec!["5", "2", "3"]);
        assert!(ListFilters::default().is_empty());
        assert_eq!(ListFilters::default().apply(&catalog).len(), 5);
    }

    #[test]
    fn test_work_has_no_categories() {
        let catalog: Catalog<WorkRecord> = Catalog::load(&[work("a", "2024-01-01", false)]).unwrap();
        assert!(categories(&catalog).is_empty());
        assert!(by_category(&catalog, "Identity").is_empty());
    }
}
