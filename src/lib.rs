//! Listing Cache - a bounded, path-keyed cache for remote listing data
//!
//! Sits between an interactive tool and a remote resource-listing API and
//! avoids redundant round-trips during operations like tab-completion.
//! Combines TTL-based freshness, explicit dirty invalidation, LRU eviction
//! and an optimistic in-place update path.

pub mod cache;
pub mod config;
pub mod error;

use std::sync::{Arc, Mutex};

pub use cache::{
    CacheEntry, CacheLookup, CacheStats, FreshnessPolicy, ListingCache, LruTracker, PathPattern,
    StatsSnapshot, TtlRule,
};
pub use config::CacheConfig;
pub use error::{CacheError, Result};

/// Shared handle for multi-threaded hosts.
///
/// Reads reorder recency, so every cache operation is a mutation; the whole
/// store is a single critical section behind one mutex. There is no
/// finer-grained locking scheme.
pub type SharedListingCache<T> = Arc<Mutex<ListingCache<T>>>;
