use std::sync::Arc;

use palate::cache::CacheStore;
use palate::repository::Repository;
use palate::RecommendationEngine;

/// Shared handler state: the engine component graph behind an `Arc`.
pub struct HandlerState<R, C>
where
    R: Repository + 'static,
    C: CacheStore + 'static,
{
    pub engine: Arc<RecommendationEngine<R, C>>,
}

impl<R, C> Clone for HandlerState<R, C>
where
    R: Repository + 'static,
    C: CacheStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<R, C> HandlerState<R, C>
where
    R: Repository + 'static,
    C: CacheStore + 'static,
{
    pub fn new(engine: Arc<RecommendationEngine<R, C>>) -> Self {
        Self { engine }
    }
}
