//! Cache Statistics Module
//!
//! Tracks cache outcomes: fresh hits, misses, stale hits and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Monotone outcome counters, zeroed only by an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that found a fresh entry
    pub hits: u64,
    /// Reads that found nothing
    pub misses: u64,
    /// Reads that found a present but not-fresh entry (still served)
    pub stale_hits: u64,
    /// Entries removed by the capacity bound
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fresh hits over all lookups, or 0.0 if nothing was looked up.
    ///
    /// Stale hits count as lookups but not as hits: a stale read costs the
    /// caller a background refresh.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.stale_hits;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the fresh-hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Stale Hit ==
    /// Increments the stale-hit counter.
    pub fn record_stale_hit(&mut self) {
        self.stale_hits += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Reset ==
    /// Zeroes all four counters. Stored entries are unaffected.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Stats Snapshot ==
/// Point-in-time view of the cache for reporting.
///
/// Produced by [`crate::ListingCache::snapshot`]; carries the counters plus
/// the current entry count and an estimated total payload size in bytes.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Reads that found a fresh entry
    pub hits: u64,
    /// Reads that found nothing
    pub misses: u64,
    /// Reads that found a present but not-fresh entry
    pub stale_hits: u64,
    /// Entries removed by the capacity bound
    pub evictions: u64,
    /// Current number of entries
    pub entry_count: usize,
    /// Sum of serialized payload sizes in bytes
    pub estimated_total_size: usize,
}

impl StatsSnapshot {
    /// Assembles a snapshot from the counters and the measured store state.
    pub fn new(stats: &CacheStats, entry_count: usize, estimated_total_size: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            stale_hits: stats.stale_hits,
            evictions: stats.evictions,
            entry_count,
            estimated_total_size,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.stale_hits, 0);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_counts_stale_as_lookup() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_stale_hit();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_record_each_counter() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        stats.record_stale_hit();
        stats.record_eviction();

        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.stale_hits, 1);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_reset() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_eviction();

        stats.reset();

        assert_eq!(stats, CacheStats::new());
    }

    #[test]
    fn test_snapshot_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        let snapshot = StatsSnapshot::new(&stats, 3, 120);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"entry_count\":3"));
        assert!(json.contains("\"estimated_total_size\":120"));
        assert!(json.contains("\"stale_hits\":0"));
    }
}
