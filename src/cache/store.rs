//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and
//! per-path TTL freshness.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, FreshnessPolicy, LruTracker, StatsSnapshot};
use crate::config::CacheConfig;

// == Cache Lookup ==
/// Result of a successful lookup.
///
/// The payload is returned even when stale: callers render it immediately
/// and use `fresh` to decide whether to trigger a background refresh.
#[derive(Debug, Clone)]
pub struct CacheLookup<T> {
    /// Copy of the cached payload
    pub payload: T,
    /// Whether the entry may be served without a refresh
    pub fresh: bool,
    /// Time since the entry was stored or last patched
    pub age: Duration,
}

// == Listing Cache ==
/// Bounded, path-keyed cache with LRU eviction and TTL freshness.
///
/// Sole owner of all entries; callers receive payload copies, never
/// references into the store.
#[derive(Debug)]
pub struct ListingCache<T> {
    /// Path-to-entry storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Recency tracker, least recently used first
    lru: LruTracker,
    /// Outcome counters
    stats: CacheStats,
    /// TTL resolution, read-only after construction
    policy: FreshnessPolicy,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl<T> ListingCache<T> {
    // == Constructor ==
    /// Creates a new ListingCache from construction parameters.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            policy: FreshnessPolicy::new(config.ttl_rules, config.default_ttl),
            max_entries: config.max_entries,
        }
    }

    // == Get ==
    /// Looks up a path, promoting it to most recently used on a hit.
    ///
    /// A present entry is always returned, fresh or not; the `fresh` flag
    /// tells the caller whether to schedule a refresh. A miss changes no
    /// recency order.
    pub fn get(&mut self, path: &str) -> Option<CacheLookup<T>>
    where
        T: Clone,
    {
        let now = Instant::now();

        let Some(entry) = self.entries.get(path) else {
            self.stats.record_miss();
            trace!(path, "cache miss");
            return None;
        };

        let fresh = self.policy.is_fresh(entry, now);
        let lookup = CacheLookup {
            payload: entry.payload.clone(),
            fresh,
            age: entry.age(now),
        };

        if fresh {
            self.stats.record_hit();
        } else {
            self.stats.record_stale_hit();
            trace!(path, "stale hit, caller should refresh");
        }
        self.lru.touch(path);

        Some(lookup)
    }

    // == Set ==
    /// Stores a listing for a path.
    ///
    /// An existing entry for the path is replaced and the path lands at the
    /// most-recently-used position. The TTL comes from the override when
    /// given, otherwise from the rule table. Cannot fail; over-capacity
    /// stores shed their least recently used entries afterwards.
    pub fn set(&mut self, path: impl Into<String>, payload: T, ttl_override: Option<Duration>) {
        self.insert(path, payload, ttl_override, false);
    }

    /// Full-control form of [`Self::set`]: `dirty` lets producers seed an
    /// entry that is already known to be out of date.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        payload: T,
        ttl_override: Option<Duration>,
        dirty: bool,
    ) {
        let path = path.into();
        let ttl = self.policy.resolve_ttl(&path, ttl_override);

        // Remove first so the re-insert lands at the MRU end rather than
        // the old slot
        if self.entries.remove(&path).is_some() {
            self.lru.remove(&path);
        }

        self.entries
            .insert(path.clone(), CacheEntry::new(payload, ttl, dirty));
        self.lru.touch(&path);

        self.enforce_capacity();
    }

    // == Mark Dirty ==
    /// Flags a path's payload as no longer reflecting reality.
    ///
    /// Leaves timestamp, recency position and counters untouched. No-op if
    /// the path is absent.
    pub fn mark_dirty(&mut self, path: &str) {
        if let Some(entry) = self.entries.get_mut(path) {
            entry.dirty = true;
            trace!(path, "marked dirty");
        }
    }

    // == Update ==
    /// Patches a cached payload in place, restoring freshness.
    ///
    /// The replacement payload becomes fresh (`dirty` cleared, timestamp
    /// reset) without a round-trip. Unlike [`Self::set`], the entry keeps
    /// its recency position: silent optimistic patches must not disturb
    /// LRU order. Counters are untouched.
    ///
    /// Returns whether the path was present.
    pub fn update<F>(&mut self, path: &str, f: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let Some(entry) = self.entries.get_mut(path) else {
            return false;
        };

        // Compute into a temporary, then commit; a panicking transform
        // leaves the entry as it was
        let next = f(&entry.payload);
        entry.payload = next;
        entry.created_at = Instant::now();
        entry.dirty = false;
        true
    }

    /// Fallible form of [`Self::update`].
    ///
    /// The transform's error is propagated and the entry is left exactly as
    /// it was; the commit happens only on `Ok`.
    pub fn try_update<F, E>(&mut self, path: &str, f: F) -> Result<bool, E>
    where
        F: FnOnce(&T) -> Result<T, E>,
    {
        let Some(entry) = self.entries.get_mut(path) else {
            return Ok(false);
        };

        let next = f(&entry.payload)?;
        entry.payload = next;
        entry.created_at = Instant::now();
        entry.dirty = false;
        Ok(true)
    }

    // == Invalidate ==
    /// Removes the entry for a path. Idempotent; absent paths are a no-op.
    pub fn invalidate(&mut self, path: &str) {
        if self.entries.remove(path).is_some() {
            self.lru.remove(path);
            debug!(path, "invalidated cached listing");
        }
    }

    // == Clear ==
    /// Removes every entry. Counters are unaffected.
    pub fn clear(&mut self) {
        let dropped = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        if dropped > 0 {
            debug!(dropped, "cleared listing cache");
        }
    }

    // == Eviction ==
    /// Sheds least recently used entries until the capacity bound holds.
    ///
    /// With `max_entries == 0` the store is a legal no-op sink: every
    /// insert is immediately evicted.
    fn enforce_capacity(&mut self) {
        while self.entries.len() > self.max_entries {
            let Some(victim) = self.lru.pop_lru() else {
                break;
            };
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(path = %victim, "evicted least recently used listing");
        }
    }

    // == Stats ==
    /// Returns a copy of the outcome counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }

    /// Zeroes the outcome counters. Stored entries are untouched.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Paths ==
    /// Cached paths in recency order, least recently used first.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.lru.iter().map(String::as_str)
    }

    /// Checks whether a path is cached, without touching recency or stats.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: serde::Serialize> ListingCache<T> {
    // == Snapshot ==
    /// Point-in-time statistics view.
    ///
    /// The size estimate serializes every stored payload and sums the byte
    /// lengths. This is O(n) over current entries and recomputed on every
    /// call; keep it off hot paths.
    pub fn snapshot(&self) -> StatsSnapshot {
        let estimated_total_size = self
            .entries
            .values()
            .map(|e| serde_json::to_vec(&e.payload).map(|b| b.len()).unwrap_or(0))
            .sum();
        StatsSnapshot::new(&self.stats, self.entries.len(), estimated_total_size)
    }
}
