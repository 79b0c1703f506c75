//! Palate recommendation engine (used by the server and integration tests).
//!
//! Recommends marketplace vendors by fusing collaborative signals (what
//! similar users ordered) with content signals (the user's preferred
//! categories and cuisines), falling back to global popularity when personal
//! data is absent.
//!
//! # Public API Surface
//!
//! ## Engine
//! - [`RecommendationEngine`] - component graph over a repository and cache
//! - [`TrendingRanker`], [`CollaborativeRanker`], [`ContentRanker`],
//!   [`SimilarityFinder`] - individual strategies
//! - [`EngineError`] - engine error taxonomy
//!
//! ## Collaborators
//! - [`Repository`], [`PgRepository`], [`RepositoryError`] - order/vendor
//!   aggregate queries
//! - [`CacheStore`], [`RedisCacheStore`], [`MemoryCacheStore`],
//!   [`CacheError`] - TTL key-value store for ranked id sequences
//!
//! ## Domain Model
//! - [`Vendor`], [`VendorSummary`], [`SimilarVendor`] - vendor records and
//!   response summaries
//! - [`Order`], [`OrderStatus`], [`UserHistoryEntry`] - order history
//!
//! ## Configuration & Constants
//! - [`Config`], [`ConfigError`] - `PALATE_*` environment configuration
//! - Cache keys, TTLs, and ranking bounds in [`constants`]
//!
//! ## Test/Mock Support
//! [`MockRepository`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod engine;
pub mod model;
pub mod repository;

pub use cache::{
    decode_ids, encode_ids, user_recommendations_key, CacheError, CacheStore, MemoryCacheStore,
    RedisCacheStore,
};
pub use config::{Config, ConfigError};
pub use constants::{
    COLLABORATIVE_CACHE_TTL, DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_SIMILAR_LIMIT, MAX_NEIGHBORS,
    MIN_SHARED_VENDORS, TOP_PREFERENCE_COUNT, TRENDING_CACHE_KEY, TRENDING_CACHE_TTL,
    TRENDING_WINDOW_DAYS, USER_RECOMMENDATIONS_KEY_PREFIX,
};
pub use engine::{
    CollaborativeRanker, ContentRanker, EngineError, RecommendationEngine, SimilarityFinder,
    TrendingRanker,
};
pub use model::{
    CandidateVendor, NeighborVendorScore, Order, OrderStatus, SimilarVendor, SimilarVendorRow,
    TrendingVendor, UserHistoryEntry, Vendor, VendorProfile, VendorSummary,
};
pub use repository::{PgRepository, Repository, RepositoryError};

#[cfg(any(test, feature = "mock"))]
pub use repository::MockRepository;
