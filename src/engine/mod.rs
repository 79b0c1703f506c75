//! Recommendation engine: per-strategy rankers and the hybrid fuser.
//!
//! The engine is an explicit component graph: the repository and cache are
//! injected once at construction and shared by the rankers through `Arc`
//! handles. Each call is stateless; the cache is the only cross-request
//! memory.

pub mod collaborative;
pub mod content;
pub mod error;
pub mod similar;
pub mod trending;

mod hybrid;


pub use collaborative::CollaborativeRanker;
pub use content::ContentRanker;
pub use error::EngineError;
pub use similar::SimilarityFinder;
pub use trending::TrendingRanker;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::cache::CacheStore;
use crate::model::{SimilarVendor, VendorSummary};
use crate::repository::Repository;

/// Hybrid recommendation engine combining collaborative, content-based, and
/// trending strategies over an injected repository and cache.
pub struct RecommendationEngine<R, C> {
    repo: Arc<R>,
    trending: TrendingRanker<R, C>,
    collaborative: CollaborativeRanker<R, C>,
    content: ContentRanker<R, C>,
    similarity: SimilarityFinder<R>,
}

impl<R, C> Clone for RecommendationEngine<R, C> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            trending: self.trending.clone(),
            collaborative: self.collaborative.clone(),
            content: self.content.clone(),
            similarity: self.similarity.clone(),
        }
    }
}

impl<R, C> std::fmt::Debug for RecommendationEngine<R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationEngine").finish()
    }
}

impl<R, C> RecommendationEngine<R, C>
where
    R: Repository,
    C: CacheStore,
{
    /// Builds the engine component graph from shared collaborator handles.
    pub fn new(repo: Arc<R>, cache: Arc<C>) -> Self {
        let trending = TrendingRanker::new(Arc::clone(&repo), Arc::clone(&cache));
        let collaborative = CollaborativeRanker::new(Arc::clone(&repo), Arc::clone(&cache));
        let content = ContentRanker::new(Arc::clone(&repo), trending.clone());
        let similarity = SimilarityFinder::new(Arc::clone(&repo));

        Self {
            repo,
            trending,
            collaborative,
            content,
            similarity,
        }
    }

    /// Returns the trending ranker.
    pub fn trending_ranker(&self) -> &TrendingRanker<R, C> {
        &self.trending
    }

    /// Returns the collaborative ranker.
    pub fn collaborative_ranker(&self) -> &CollaborativeRanker<R, C> {
        &self.collaborative
    }

    /// Returns the content ranker.
    pub fn content_ranker(&self) -> &ContentRanker<R, C> {
        &self.content
    }

    /// Global popularity ranking, see [`TrendingRanker::trending`].
    pub async fn trending(&self, limit: usize) -> Result<Vec<String>, EngineError> {
        self.trending.trending(limit).await
    }

    /// Vendors similar to a reference vendor, see [`SimilarityFinder::similar`].
    pub async fn similar(
        &self,
        vendor_id: &str,
        limit: usize,
    ) -> Result<Vec<SimilarVendor>, EngineError> {
        self.similarity.similar(vendor_id, limit).await
    }

    /// Hybrid personalized recommendations.
    ///
    /// Computes the collaborative and content-based sequences independently,
    /// interleaves them with collaborative favored at equal rank depth,
    /// falls back to trending when both are empty, and hydrates the merged
    /// ids into vendor summaries. Ids that fail hydration (vendor deleted
    /// between scoring and lookup) are dropped rather than failing the
    /// request.
    #[instrument(skip(self))]
    pub async fn personalized(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<VendorSummary>, EngineError> {
        ensure_limit(limit)?;

        let collaborative = self.collaborative.collaborative(user_id, limit).await?;
        let content = self.content.content_based(user_id, limit).await?;

        let mut merged = hybrid::interleave(&collaborative, &content, limit);
        if merged.is_empty() {
            debug!(user_id, "no personalized candidates, falling back to trending");
            merged = self.trending.trending(limit).await?;
        }

        self.hydrate(&merged).await
    }

    async fn hydrate(&self, ids: &[String]) -> Result<Vec<VendorSummary>, EngineError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let vendors = self.repo.vendors_by_id(ids).await?;
        let mut by_id: HashMap<String, VendorSummary> = vendors
            .into_iter()
            .map(|v| (v.id.clone(), VendorSummary::from(v)))
            .collect();

        let summaries: Vec<VendorSummary> =
            ids.iter().filter_map(|id| by_id.remove(id)).collect();

        if summaries.len() < ids.len() {
            debug!(
                requested = ids.len(),
                resolved = summaries.len(),
                "dropped ids that failed hydration"
            );
        }

        Ok(summaries)
    }
}

/// Rejects a zero limit instead of silently returning an empty sequence.
pub(crate) fn ensure_limit(limit: usize) -> Result<(), EngineError> {
    if limit == 0 {
        return Err(EngineError::InvalidLimit { value: 0 });
    }
    Ok(())
}

/// Cache read that treats any backend failure as a miss.
pub(crate) async fn cached_ids<C: CacheStore>(cache: &C, key: &str) -> Option<Vec<String>> {
    match cache.get_ids(key).await {
        Ok(hit) => hit,
        Err(e) => {
            warn!(key, error = %e, "cache read failed, computing fresh");
            None
        }
    }
}

/// Cache write that logs and continues on failure.
pub(crate) async fn store_ids<C: CacheStore>(
    cache: &C,
    key: &str,
    ids: &[String],
    ttl: Duration,
) {
    if let Err(e) = cache.put_ids(key, ids, ttl).await {
        warn!(key, error = %e, "cache write failed, serving uncached result");
    }
}
