//! Engine error types.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors surfaced by the recommendation engine.
///
/// Cache failures never appear here: a ranker that cannot reach the cache
/// logs a warning and computes fresh.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced vendor does not exist (similarity lookups only).
    #[error("vendor not found: {vendor_id}")]
    VendorNotFound { vendor_id: String },

    /// A non-positive result limit was requested.
    #[error("limit must be positive, got {value}")]
    InvalidLimit { value: i64 },

    /// The repository failed; propagated without retry.
    #[error("repository query failed: {0}")]
    Repository(#[from] RepositoryError),
}
