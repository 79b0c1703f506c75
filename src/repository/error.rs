//! Repository error types.

use thiserror::Error;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Could not open a connection or acquire one from the pool.
    #[error("failed to connect to data store at {url}: {message}")]
    ConnectionFailed { url: String, message: String },

    /// A query failed to execute or decode.
    #[error("query '{query}' failed: {message}")]
    QueryFailed {
        query: &'static str,
        message: String,
    },
}

impl RepositoryError {
    /// Builds a [`RepositoryError::QueryFailed`] mapper for `query`.
    pub(crate) fn for_query(query: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::QueryFailed {
            query,
            message: source.to_string(),
        }
    }
}
