//! Front-end parity tests
//!
//! Both front ends run against one shared in-memory store; for every
//! operation the REST `data` payload and the MCP text payload must be the
//! same JSON. These tests lock that equivalence, plus the cross-front-end
//! round-trip behavior.
//!
//! Run with: cargo test --test parity_tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use couponhub::http::{router, AppState};
use couponhub::mcp::CouponHubHandler;
use couponhub::storage::Storage;

/// Both front ends over the same storage handle
struct Fixture {
    app: axum::Router,
    handler: CouponHubHandler,
}

fn fixture() -> Fixture {
    let storage = Storage::open_in_memory().unwrap();
    let app = router(AppState {
        storage: storage.clone(),
        api_key: None,
    });
    Fixture {
        app,
        handler: CouponHubHandler::new(storage),
    }
}

async fn rest_json(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn rest_get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    rest_json(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

fn tool_json(handler: &CouponHubHandler, name: &str, args: Value) -> (bool, Value) {
    let result = handler.handle_tool_call(name, args);
    let payload: Value = serde_json::from_str(result.text_content().unwrap()).unwrap();
    (result.is_error == Some(true), payload)
}

fn seed(handler: &CouponHubHandler, title: &str, merchant: &str, category: Option<&str>) -> Value {
    let (is_error, stored) = tool_json(
        handler,
        "add_coupon",
        json!({
            "title": title,
            "description": format!("{} details", title),
            "merchantName": merchant,
            "merchantSlug": merchant.to_lowercase(),
            "categorySlug": category,
            "country": "US",
        }),
    );
    assert!(!is_error, "seed failed: {}", stored);
    stored
}

#[tokio::test]
async fn round_trip_create_then_fetch_by_id() {
    let fx = fixture();

    let (status, created) = rest_json(
        &fx.app,
        Request::builder()
            .method("POST")
            .uri("/api/coupons")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "title": "Summer sale",
                    "description": "20% off everything",
                    "merchantName": "Acme",
                })
                .to_string(),
            ))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = &created["data"];
    assert_eq!(stored["title"], "Summer sale");
    assert_eq!(stored["description"], "20% off everything");
    assert_eq!(stored["merchant_name"], "Acme");
    assert!(!stored["id"].as_str().unwrap().is_empty());
    assert!(!stored["created_at"].as_str().unwrap().is_empty());

    let id = stored["id"].as_str().unwrap();
    let (status, fetched) = rest_get(&fx.app, &format!("/api/coupons/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&fetched["data"], stored);
}

#[tokio::test]
async fn get_by_id_payloads_are_identical() {
    let fx = fixture();
    let stored = seed(&fx.handler, "Deal", "Acme", Some("toys"));
    let id = stored["id"].as_str().unwrap();

    let (status, rest) = rest_get(&fx.app, &format!("/api/coupons/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (is_error, tool) = tool_json(&fx.handler, "get_coupon_details", json!({"coupon_id": id}));
    assert!(!is_error);

    assert_eq!(
        serde_json::to_vec(&rest["data"]).unwrap(),
        serde_json::to_vec(&tool).unwrap(),
    );
}

#[tokio::test]
async fn search_payloads_are_identical() {
    let fx = fixture();
    seed(&fx.handler, "a", "Acme", Some("toys"));
    seed(&fx.handler, "b", "Globex", Some("books"));
    seed(&fx.handler, "c", "Acme", None);

    let (status, rest) = rest_get(&fx.app, "/api/coupons/search?merchant=acme").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rest["count"], 2);

    let (is_error, tool) = tool_json(&fx.handler, "search_coupons", json!({"merchant": "acme"}));
    assert!(!is_error);

    assert_eq!(
        serde_json::to_vec(&rest["data"]).unwrap(),
        serde_json::to_vec(&tool).unwrap(),
    );
}

#[tokio::test]
async fn merchant_and_category_listings_are_identical() {
    let fx = fixture();
    seed(&fx.handler, "1", "Globex", Some("a"));
    seed(&fx.handler, "2", "Acme", Some("a"));
    seed(&fx.handler, "3", "Acme", None);
    seed(&fx.handler, "4", "Initech", Some("b"));

    let (_, rest) = rest_get(&fx.app, "/api/merchants").await;
    let (_, tool) = tool_json(&fx.handler, "list_merchants", json!({}));
    assert_eq!(
        serde_json::to_vec(&rest["data"]).unwrap(),
        serde_json::to_vec(&tool).unwrap(),
    );
    assert_eq!(rest["count"], 3);

    let (_, rest) = rest_get(&fx.app, "/api/categories").await;
    let (_, tool) = tool_json(&fx.handler, "list_categories", json!({}));
    assert_eq!(
        serde_json::to_vec(&rest["data"]).unwrap(),
        serde_json::to_vec(&tool).unwrap(),
    );
    // Null categories are excluded, the rest arrive sorted
    assert_eq!(rest["data"], json!(["a", "b"]));
}

#[tokio::test]
async fn not_found_maps_to_404_and_is_error() {
    let fx = fixture();

    let (status, rest) = rest_get(&fx.app, "/api/coupons/missing-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(rest["success"], false);
    assert_eq!(rest["error"], "Coupon not found");

    let (is_error, tool) = tool_json(
        &fx.handler,
        "get_coupon_details",
        json!({"coupon_id": "missing-id"}),
    );
    assert!(is_error);
    assert_eq!(tool["error"], "Coupon not found");
}

#[tokio::test]
async fn validation_failure_matches_across_front_ends() {
    let fx = fixture();

    let (status, rest) = rest_json(
        &fx.app,
        Request::builder()
            .method("POST")
            .uri("/api/coupons")
            .header("content-type", "application/json")
            .body(Body::from(json!({"title": ""}).to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (is_error, tool) = tool_json(&fx.handler, "add_coupon", json!({"title": ""}));
    assert!(is_error);

    assert_eq!(rest["error"], tool["error"]);
    assert_eq!(
        rest["error"],
        "Missing required fields: title, description, merchantName"
    );
}

#[tokio::test]
async fn writes_from_one_front_end_are_visible_to_the_other() {
    let fx = fixture();
    let stored = seed(&fx.handler, "Cross", "Acme", None);
    let id = stored["id"].as_str().unwrap();

    // Written through MCP, read through REST
    let (status, rest) = rest_get(&fx.app, &format!("/api/coupons/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rest["data"]["title"], "Cross");
}
