//! Global popularity fallback ranked by recent order volume.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, instrument};

use super::error::EngineError;
use super::{cached_ids, ensure_limit, store_ids};
use crate::cache::CacheStore;
use crate::constants::{TRENDING_CACHE_KEY, TRENDING_CACHE_TTL};
use crate::repository::Repository;

/// Ranks vendors by order volume over the trailing recency window.
pub struct TrendingRanker<R, C> {
    repo: Arc<R>,
    cache: Arc<C>,
}

impl<R, C> Clone for TrendingRanker<R, C> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<R, C> TrendingRanker<R, C>
where
    R: Repository,
    C: CacheStore,
{
    pub fn new(repo: Arc<R>, cache: Arc<C>) -> Self {
        Self { repo, cache }
    }

    /// Returns up to `limit` trending vendor ids, most popular first.
    ///
    /// A cache hit is authoritative for its TTL: the cached sequence is
    /// truncated to `limit` and returned as-is, even when `limit` exceeds
    /// the cached length. On a miss the full computed sequence is cached
    /// before returning.
    #[instrument(skip(self))]
    pub async fn trending(&self, limit: usize) -> Result<Vec<String>, EngineError> {
        ensure_limit(limit)?;

        if let Some(mut cached) = cached_ids(self.cache.as_ref(), TRENDING_CACHE_KEY).await {
            debug!(cached_len = cached.len(), "trending cache hit");
            cached.truncate(limit);
            return Ok(cached);
        }

        let mut rows = self.repo.trending(limit).await?;
        rows.sort_by(|a, b| {
            b.recent_orders.cmp(&a.recent_orders).then_with(|| {
                b.average_rating
                    .partial_cmp(&a.average_rating)
                    .unwrap_or(Ordering::Equal)
            })
        });

        let ids: Vec<String> = rows.into_iter().map(|row| row.vendor_id).collect();
        debug!(computed = ids.len(), "trending computed from order history");

        store_ids(self.cache.as_ref(), TRENDING_CACHE_KEY, &ids, TRENDING_CACHE_TTL).await;
        Ok(ids)
    }
}
