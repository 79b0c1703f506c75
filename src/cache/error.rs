//! Cache error types.

use thiserror::Error;

/// Errors surfaced by cache backends.
///
/// The rankers treat every variant as non-fatal: a failed read computes
/// fresh, a failed write serves the uncached result.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache backend is unreachable or returned an error.
    #[error("cache unavailable: {message}")]
    Unavailable { message: String },

    /// An id sequence could not be serialized for storage.
    #[error("failed to serialize cache value: {message}")]
    Serialization { message: String },

    /// A cached value did not parse as an id sequence.
    #[error("malformed cache value: {message}")]
    Deserialization { message: String },
}
