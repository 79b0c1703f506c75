//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside the valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Pool size string could not be parsed as a number.
    #[error("failed to parse pool size '{value}': {source}")]
    PoolSizeParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Pool size must be at least 1.
    #[error("invalid pool size '{value}': must be at least 1")]
    InvalidPoolSize { value: String },

    /// A connection URL has an unexpected scheme.
    #[error("invalid URL in {name}: '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}
