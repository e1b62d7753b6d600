//! Configuration Module
//!
//! Handles cache construction parameters and their environment overrides.

use std::env;
use std::time::Duration;

use crate::cache::{PathPattern, TtlRule, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};

/// Cache construction parameters.
///
/// Built explicitly by the host tool and handed to [`crate::ListingCache::new`];
/// the cache never reads hidden global state.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// TTL applied when no rule matches a path
    pub default_ttl: Duration,
    /// Ordered path-to-TTL rule table; registration order is the tie-break
    /// order among wildcard rules
    pub ttl_rules: Vec<TtlRule>,
}

impl CacheConfig {
    /// Creates a CacheConfig with the given capacity and default TTL and the
    /// seeded rule table.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            max_entries,
            default_ttl,
            ttl_rules: default_rules(),
        }
    }

    /// Creates a CacheConfig by loading scalar overrides from environment
    /// variables. The rule table stays seeded.
    ///
    /// # Environment Variables
    /// - `LISTING_CACHE_MAX_ENTRIES` - Maximum cache entries (default: 100)
    /// - `LISTING_CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 180000)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("LISTING_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ENTRIES),
            default_ttl: env::var("LISTING_CACHE_DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TTL),
            ttl_rules: default_rules(),
        }
    }

    /// Replaces the rule table, preserving the given registration order.
    pub fn with_rules(mut self, rules: Vec<TtlRule>) -> Self {
        self.ttl_rules = rules;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

/// Seeded per-path TTL rules.
///
/// The public listing root and the plugin bin change rarely; per-user roots
/// and feed outputs churn with normal use.
fn default_rules() -> Vec<TtlRule> {
    vec![
        TtlRule::new(PathPattern::exact("/PUBLIC"), Duration::from_secs(600)),
        TtlRule::new(PathPattern::wildcard("/users/", ""), Duration::from_secs(300)),
        TtlRule::new(PathPattern::exact("/plugins/bin"), Duration::from_secs(3600)),
        TtlRule::new(PathPattern::wildcard("/feeds/", "/out"), Duration::from_secs(300)),
    ]
}
