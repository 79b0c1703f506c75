//! HTTP gateway (Axum) for the recommendation engine.
//!
//! A thin request/response adapter: each route maps 1:1 onto one engine
//! operation and holds no logic of its own.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use palate::cache::CacheStore;
use palate::repository::Repository;

pub use handler::{recommendations_handler, similar_vendors_handler, trending_handler};
pub use state::HandlerState;

pub fn create_router_with_state<R, C>(state: HandlerState<R, C>) -> Router
where
    R: Repository + 'static,
    C: CacheStore + 'static,
{
    Router::new()
        .route("/", get(service_info_handler))
        .route("/healthz", get(health_handler))
        .route("/recommendations/{user_id}", get(recommendations_handler))
        .route("/trending", get(trending_handler))
        .route("/similar-vendors/{vendor_id}", get(similar_vendors_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct ServiceInfoResponse {
    pub service: &'static str,
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[tracing::instrument]
pub async fn service_info_handler() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        service: "palate-recommendation",
        status: "healthy",
    })
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
