//! Router-level tests for the gateway, driven through `tower::oneshot`
//! against the mock repository and the in-memory cache store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use palate::{
    MemoryCacheStore, MockRepository, Order, OrderStatus, RecommendationEngine, Vendor,
};

use crate::gateway::{create_router_with_state, HandlerState};

fn vendor(id: &str, category: &str, cuisines: &[&str], rating: f64) -> Vendor {
    Vendor {
        id: id.to_string(),
        name: format!("{id} kitchen"),
        category: category.to_string(),
        cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
        average_rating: rating,
        total_orders: 50,
        is_active: true,
        is_online: true,
        average_delivery_time: Some(30),
        price_range: Some("$$".to_string()),
    }
}

fn delivered(customer: &str, vendor: &str) -> Order {
    Order {
        customer_id: customer.to_string(),
        vendor_id: vendor.to_string(),
        status: OrderStatus::Delivered,
        created_at: Utc::now() - chrono::Duration::days(1),
        customer_rating: None,
    }
}

/// Router over a seeded marketplace: pizza and sushi vendors, one user with
/// history, and enough crowd volume for trending.
fn test_router() -> Router {
    let repo = MockRepository::new();
    repo.insert_vendor(vendor("napoli", "pizza", &["italian"], 4.6));
    repo.insert_vendor(vendor("roma", "pizza", &["italian"], 4.2));
    repo.insert_vendor(vendor("edo", "sushi", &["japanese"], 4.7));

    repo.insert_order(delivered("alice", "napoli"));
    for i in 0..3 {
        repo.insert_order(delivered(&format!("crowd-{i}"), "edo"));
    }
    repo.insert_order(delivered("crowd-0", "napoli"));

    let repo = Arc::new(repo);
    let cache = Arc::new(MemoryCacheStore::new());
    let engine = Arc::new(RecommendationEngine::new(repo, cache));

    create_router_with_state(HandlerState::new(engine))
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_service_info() {
    let (status, json) = get_json(test_router(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["service"], "palate-recommendation");
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_healthz() {
    let (status, json) = get_json(test_router(), "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_trending_returns_ranked_ids() {
    let (status, json) = get_json(test_router(), "/trending").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);
    assert_eq!(json["trending"][0], "edo");
    assert_eq!(json["trending"][1], "napoli");
}

#[tokio::test]
async fn test_trending_respects_limit() {
    let (status, json) = get_json(test_router(), "/trending?limit=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["trending"][0], "edo");
}

#[tokio::test]
async fn test_non_positive_limits_are_bad_requests() {
    for uri in [
        "/trending?limit=0",
        "/trending?limit=-2",
        "/recommendations/alice?limit=0",
        "/similar-vendors/napoli?limit=-1",
    ] {
        let (status, json) = get_json(test_router(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "expected 400 for {uri}");
        assert_eq!(json["code"], 400);
    }
}

#[tokio::test]
async fn test_recommendations_for_user_with_history() {
    let (status, json) = get_json(test_router(), "/recommendations/alice").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user_id"], "alice");

    let recommendations = json["recommendations"].as_array().unwrap();
    assert_eq!(json["count"], recommendations.len());
    assert!(!recommendations.is_empty());

    // alice already ordered from napoli; it must not be recommended.
    let ids: Vec<&str> = recommendations
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert!(!ids.contains(&"napoli"));
    assert!(ids.contains(&"roma"));

    // Hydrated summaries carry the display fields.
    let roma = recommendations
        .iter()
        .find(|r| r["id"] == "roma")
        .unwrap();
    assert_eq!(roma["category"], "pizza");
    assert_eq!(roma["rating"], 4.2);
}

#[tokio::test]
async fn test_similar_vendors_for_known_vendor() {
    let (status, json) = get_json(test_router(), "/similar-vendors/napoli").await;

    assert_eq!(status, StatusCode::OK);
    let similar = json["similar_vendors"].as_array().unwrap();
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0]["id"], "roma");
    assert_eq!(similar[0]["rating"], 4.2);
}

#[tokio::test]
async fn test_similar_vendors_for_unknown_vendor_is_404() {
    let (status, json) = get_json(test_router(), "/similar-vendors/nowhere").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], 404);
    assert!(json["error"].as_str().unwrap().contains("nowhere"));
}
