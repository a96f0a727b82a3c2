//! Runtime configuration, read from environment variables.
//!
//! | Variable         | Default       |
//! |------------------|---------------|
//! | `DATA_DIR`       | `data`        |
//! | `PORT`           | `3000`        |
//! | `LOAD_POLICY`    | `collect-all` |
//! | `RELATED_LIMIT`  | `3`           |
//! | `LATEST_LIMIT`   | `3`           |
//! | `CACHE_CAPACITY` | `1000`        |

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::catalog::LoadPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub data_dir: PathBuf,
    pub port: u16,
    pub load_policy: LoadPolicy,
    /// Related cards on a detail page.
    pub related_limit: usize,
    /// Cards per "latest" rail on the home page.
    pub latest_limit: usize,
    /// Max cached detail views (api feature).
    pub cache_capacity: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            port: 3000,
            load_policy: LoadPolicy::CollectAll,
            related_limit: 3,
            latest_limit: 3,
            cache_capacity: 1_000,
        }
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Numeric values that fail to parse keep
    /// their defaults; an unknown load policy is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let load_policy = match lookup("LOAD_POLICY") {
            Some(raw) => raw.parse::<LoadPolicy>().map_err(|e| anyhow!(e))?,
            None => defaults.load_policy,
        };

        Ok(Self {
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            port: parse_or(&lookup, "PORT", defaults.port),
            load_policy,
            related_limit: parse_or(&lookup, "RELATED_LIMIT", defaults.related_limit),
            latest_limit: parse_or(&lookup, "LATEST_LIMIT", defaults.latest_limit),
            cache_capacity: parse_or(&lookup, "CACHE_CAPACITY", defaults.cache_capacity),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            ("DATA_DIR", "/srv/content"),
            ("PORT", "8080"),
            ("LOAD_POLICY", "fail-fast"),
            ("RELATED_LIMIT", "4"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/content"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.load_policy, LoadPolicy::FailFast);
        assert_eq!(config.related_limit, 4);
        assert_eq!(config.latest_limit, 3);
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = CatalogConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_unknown_policy_is_error() {
        assert!(CatalogConfig::from_lookup(lookup_from(&[("LOAD_POLICY", "lenient")])).is_err());
    }
}
