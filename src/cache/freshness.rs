//! Freshness Policy Module
//!
//! Resolves the TTL to stamp on new entries from an ordered rule table and
//! decides whether an entry may still be served as fresh.

use std::time::{Duration, Instant};

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

// == Path Pattern ==
/// A path matcher for TTL rules: either an exact path or a glob with a
/// single wildcard segment, anchored at both ends.
///
/// Matching is straight substring comparison; no regular expressions are
/// compiled at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the path byte-for-byte
    Exact(String),
    /// Matches `prefix` + any substring (possibly empty) + `suffix`
    Wildcard { prefix: String, suffix: String },
}

impl PathPattern {
    // == Constructors ==
    /// Creates an exact-match pattern.
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    /// Creates a single-wildcard pattern from its fixed prefix and suffix.
    pub fn wildcard(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self::Wildcard {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    // == Parse ==
    /// Parses a pattern string.
    ///
    /// A string without `*` is an exact pattern; a string with one `*` is a
    /// wildcard pattern split at the star. More than one `*` is rejected.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut parts = pattern.split('*');
        let prefix = parts.next().unwrap_or_default();
        match (parts.next(), parts.next()) {
            (None, _) => Ok(Self::exact(prefix)),
            (Some(suffix), None) => Ok(Self::wildcard(prefix, suffix)),
            (Some(_), Some(_)) => Err(CacheError::InvalidPattern(pattern.to_string())),
        }
    }

    // == Matches ==
    /// Tests a path against the pattern, anchored at both ends.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Wildcard { prefix, suffix } => {
                // The length check keeps prefix and suffix from overlapping
                // on short paths
                path.len() >= prefix.len() + suffix.len()
                    && path.starts_with(prefix.as_str())
                    && path.ends_with(suffix.as_str())
            }
        }
    }

    /// Whether this pattern is an exact match (outranks wildcards).
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

// == TTL Rule ==
/// Associates a path pattern with the TTL stamped on matching entries.
#[derive(Debug, Clone)]
pub struct TtlRule {
    pattern: PathPattern,
    ttl: Duration,
}

impl TtlRule {
    /// Creates a new rule.
    pub fn new(pattern: PathPattern, ttl: Duration) -> Self {
        Self { pattern, ttl }
    }

    /// Parses a rule from a pattern string.
    pub fn parse(pattern: &str, ttl: Duration) -> Result<Self> {
        Ok(Self::new(PathPattern::parse(pattern)?, ttl))
    }

    /// The rule's pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The rule's TTL.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

// == Freshness Policy ==
/// Read-only TTL resolution over an ordered rule table.
///
/// Rules are kept in registration order: an exact match always outranks a
/// wildcard match, and among wildcard matches the first-registered rule
/// wins. Resolution is total; every path gets at least the default TTL.
#[derive(Debug, Clone)]
pub struct FreshnessPolicy {
    rules: Vec<TtlRule>,
    default_ttl: Duration,
}

impl FreshnessPolicy {
    // == Constructor ==
    /// Creates a policy from an ordered rule table and a default TTL.
    pub fn new(rules: Vec<TtlRule>, default_ttl: Duration) -> Self {
        Self { rules, default_ttl }
    }

    // == Resolve TTL ==
    /// Produces the TTL to stamp on a new entry for `path`.
    ///
    /// An explicit override wins outright; otherwise the first exact rule
    /// matching the path, then the first wildcard rule, then the default.
    pub fn resolve_ttl(&self, path: &str, override_ttl: Option<Duration>) -> Duration {
        if let Some(ttl) = override_ttl {
            return ttl;
        }

        if let Some(rule) = self
            .rules
            .iter()
            .find(|r| r.pattern.is_exact() && r.pattern.matches(path))
        {
            return rule.ttl;
        }

        self.rules
            .iter()
            .find(|r| !r.pattern.is_exact() && r.pattern.matches(path))
            .map(|r| r.ttl)
            .unwrap_or(self.default_ttl)
    }

    // == Is Fresh ==
    /// Decides freshness for an entry at the given time.
    pub fn is_fresh<T>(&self, entry: &CacheEntry<T>, now: Instant) -> bool {
        entry.is_fresh(now)
    }

    /// The TTL applied when no rule matches.
    #[allow(dead_code)]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn policy(rules: Vec<TtlRule>) -> FreshnessPolicy {
        FreshnessPolicy::new(rules, Duration::from_secs(180))
    }

    #[test]
    fn test_parse_exact() {
        let pattern = PathPattern::parse("/PUBLIC").unwrap();
        assert_eq!(pattern, PathPattern::exact("/PUBLIC"));
        assert!(pattern.matches("/PUBLIC"));
        assert!(!pattern.matches("/PUBLIC/sub"));
    }

    #[test]
    fn test_parse_wildcard() {
        let pattern = PathPattern::parse("/feeds/*/out").unwrap();
        assert_eq!(pattern, PathPattern::wildcard("/feeds/", "/out"));
    }

    #[test]
    fn test_parse_rejects_multiple_wildcards() {
        let result = PathPattern::parse("/feeds/*/out/*");
        assert!(matches!(result, Err(CacheError::InvalidPattern(_))));
    }

    #[test]
    fn test_wildcard_matches_any_middle_segment() {
        let pattern = PathPattern::wildcard("/feeds/", "/out");
        assert!(pattern.matches("/feeds/news/out"));
        assert!(pattern.matches("/feeds/a/b/out"));
        assert!(pattern.matches("/feeds//out"));
        assert!(!pattern.matches("/feeds/news/output"));
        assert!(!pattern.matches("/plugins/news/out"));
    }

    #[test]
    fn test_wildcard_no_prefix_suffix_overlap() {
        // "/aa" must not satisfy prefix "/a" and suffix "a/" by reusing bytes
        let pattern = PathPattern::wildcard("/ab", "ba/");
        assert!(!pattern.matches("/aba/"));
        assert!(pattern.matches("/abba/"));
    }

    #[test]
    fn test_trailing_wildcard() {
        let pattern = PathPattern::parse("/users/*").unwrap();
        assert!(pattern.matches("/users/alice"));
        assert!(pattern.matches("/users/alice/docs"));
        assert!(pattern.matches("/users/"));
        assert!(!pattern.matches("/user"));
    }

    #[test]
    fn test_resolve_override_wins() {
        let p = policy(vec![TtlRule::parse("/PUBLIC", Duration::from_secs(600)).unwrap()]);
        let ttl = p.resolve_ttl("/PUBLIC", Some(Duration::from_secs(5)));
        assert_eq!(ttl, Duration::from_secs(5));
    }

    #[test]
    fn test_resolve_exact_rule() {
        let p = policy(vec![TtlRule::parse("/PUBLIC", Duration::from_secs(600)).unwrap()]);
        assert_eq!(p.resolve_ttl("/PUBLIC", None), Duration::from_secs(600));
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let p = policy(vec![TtlRule::parse("/PUBLIC", Duration::from_secs(600)).unwrap()]);
        assert_eq!(p.resolve_ttl("/elsewhere", None), Duration::from_secs(180));
    }

    #[test]
    fn test_exact_outranks_wildcard_regardless_of_order() {
        let p = policy(vec![
            TtlRule::parse("/users/*", Duration::from_secs(300)).unwrap(),
            TtlRule::parse("/users/shared", Duration::from_secs(900)).unwrap(),
        ]);
        // The exact rule is registered later but still wins
        assert_eq!(p.resolve_ttl("/users/shared", None), Duration::from_secs(900));
        assert_eq!(p.resolve_ttl("/users/alice", None), Duration::from_secs(300));
    }

    #[test]
    fn test_first_registered_wildcard_wins() {
        let p = policy(vec![
            TtlRule::parse("/feeds/*", Duration::from_secs(60)).unwrap(),
            TtlRule::parse("/feeds/*/out", Duration::from_secs(300)).unwrap(),
        ]);
        // Both wildcards match; registration order breaks the tie
        assert_eq!(p.resolve_ttl("/feeds/news/out", None), Duration::from_secs(60));
    }

    #[test]
    fn test_policy_is_fresh_delegates_to_entry() {
        let p = policy(vec![]);
        let entry = CacheEntry::new("listing".to_string(), Duration::from_secs(60), false);
        assert!(p.is_fresh(&entry, Instant::now()));

        let dirty = CacheEntry::new("listing".to_string(), Duration::from_secs(60), true);
        assert!(!p.is_fresh(&dirty, Instant::now()));
    }
}
