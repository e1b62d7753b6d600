//! Error types for the listing cache
//!
//! Provides unified error handling using thiserror.
//!
//! Cache operations themselves are total: absent keys, empty stores, zero
//! capacity and elapsed TTLs all have defined outputs. Errors only arise
//! when constructing TTL rules from pattern strings.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the listing cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// TTL rule pattern contains more than one wildcard segment
    #[error("Invalid TTL pattern '{0}': at most one '*' is allowed")]
    InvalidPattern(String),
}

// == Result Type Alias ==
/// Convenience Result type for the listing cache.
pub type Result<T> = std::result::Result<T, CacheError>;
