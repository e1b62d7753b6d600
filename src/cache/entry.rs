//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with freshness metadata.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached listing with its freshness metadata.
///
/// The payload type is opaque to the cache: it is stored and returned,
/// never interpreted.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached payload
    pub payload: T,
    /// When the payload was stored or last patched
    pub created_at: Instant,
    /// Set by local mutations: the payload may no longer reflect reality,
    /// regardless of remaining TTL
    pub dirty: bool,
    /// Time-to-live stamped at insertion
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(payload: T, ttl: Duration, dirty: bool) -> Self {
        Self {
            payload,
            created_at: Instant::now(),
            dirty,
            ttl,
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry may be served without a refresh signal.
    ///
    /// Freshness is a pure function of entry state and the given time:
    /// an entry is fresh while it is not dirty and its age is strictly
    /// below its TTL. A zero or already-elapsed TTL is valid and simply
    /// yields "not fresh" immediately.
    pub fn is_fresh(&self, now: Instant) -> bool {
        !self.dirty && self.age(now) < self.ttl
    }

    // == Age ==
    /// Time elapsed since the entry was stored or last patched.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Time To Live ==
    /// Returns remaining TTL at the given time, zero once elapsed.
    ///
    /// Useful for debugging and statistics; a dirty entry can still report
    /// remaining TTL even though it will never be served fresh.
    #[allow(dead_code)]
    pub fn ttl_remaining(&self, now: Instant) -> Duration {
        self.ttl.saturating_sub(self.age(now))
    }
}
