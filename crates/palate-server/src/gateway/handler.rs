use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, instrument};

use palate::cache::CacheStore;
use palate::constants::{DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_SIMILAR_LIMIT};
use palate::repository::Repository;

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    LimitQuery, RecommendationsResponse, SimilarVendorsResponse, TrendingResponse,
};
use crate::gateway::state::HandlerState;

/// Resolves the requested limit, rejecting non-positive values before they
/// reach the engine.
fn resolve_limit(requested: Option<i64>, default: usize) -> Result<usize, GatewayError> {
    match requested {
        None => Ok(default),
        Some(value) if value <= 0 => Err(GatewayError::InvalidRequest(format!(
            "limit must be positive, got {value}"
        ))),
        Some(value) => Ok(value as usize),
    }
}

#[instrument(skip(state))]
pub async fn recommendations_handler<R, C>(
    State(state): State<HandlerState<R, C>>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<RecommendationsResponse>, GatewayError>
where
    R: Repository + 'static,
    C: CacheStore + 'static,
{
    let limit = resolve_limit(query.limit, DEFAULT_RECOMMENDATION_LIMIT)?;
    let recommendations = state.engine.personalized(&user_id, limit).await?;

    info!(
        user_id,
        count = recommendations.len(),
        "personalized recommendations served"
    );

    Ok(Json(RecommendationsResponse {
        count: recommendations.len(),
        recommendations,
        user_id,
    }))
}

#[instrument(skip(state))]
pub async fn trending_handler<R, C>(
    State(state): State<HandlerState<R, C>>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<TrendingResponse>, GatewayError>
where
    R: Repository + 'static,
    C: CacheStore + 'static,
{
    let limit = resolve_limit(query.limit, DEFAULT_RECOMMENDATION_LIMIT)?;
    let trending = state.engine.trending(limit).await?;

    Ok(Json(TrendingResponse {
        count: trending.len(),
        trending,
    }))
}

#[instrument(skip(state))]
pub async fn similar_vendors_handler<R, C>(
    State(state): State<HandlerState<R, C>>,
    Path(vendor_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<SimilarVendorsResponse>, GatewayError>
where
    R: Repository + 'static,
    C: CacheStore + 'static,
{
    let limit = resolve_limit(query.limit, DEFAULT_SIMILAR_LIMIT)?;
    let similar_vendors = state.engine.similar(&vendor_id, limit).await?;

    Ok(Json(SimilarVendorsResponse { similar_vendors }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_limit_defaults_when_omitted() {
        assert_eq!(resolve_limit(None, 10).unwrap(), 10);
        assert_eq!(resolve_limit(Some(3), 10).unwrap(), 3);
    }

    #[test]
    fn test_resolve_limit_rejects_non_positive_values() {
        assert!(resolve_limit(Some(0), 10).is_err());
        assert!(resolve_limit(Some(-5), 10).is_err());
    }
}
