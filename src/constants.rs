//! Shared constants for cache keys, TTLs, and ranking bounds.

use std::time::Duration;

/// Cache key for the global trending sequence.
pub const TRENDING_CACHE_KEY: &str = "recommendations:trending";

/// Prefix for per-user collaborative recommendation cache keys.
pub const USER_RECOMMENDATIONS_KEY_PREFIX: &str = "recommendations:user:";

/// TTL for cached per-user collaborative sequences (1 hour).
pub const COLLABORATIVE_CACHE_TTL: Duration = Duration::from_secs(3600);

/// TTL for the cached trending sequence (30 minutes).
pub const TRENDING_CACHE_TTL: Duration = Duration::from_secs(1800);

/// Minimum number of vendors two customers must share before one counts as a
/// collaborative-filtering neighbor.
pub const MIN_SHARED_VENDORS: i64 = 2;

/// Maximum number of neighbor users considered per collaborative query.
pub const MAX_NEIGHBORS: i64 = 50;

/// Number of top categories and top cuisines kept as a user's preferences.
pub const TOP_PREFERENCE_COUNT: usize = 3;

/// Lookback window for trending order volume, in days.
pub const TRENDING_WINDOW_DAYS: i32 = 7;

/// Default result count for personalized and trending recommendations.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// Default result count for vendor similarity lookups.
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;
