//! REST front end
//!
//! Thin axum layer over the shared core: every handler translates its
//! request into an intent, runs the corresponding query, and renders the
//! resulting `Outcome`. Response shaping lives entirely in `outcome`.

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{CouponHubError, Result};
use crate::openapi;
use crate::outcome::Outcome;
use crate::storage::{queries, Storage};
use crate::types::{CouponDraft, ListQuery, SearchQuery};

/// Shared state for the REST front end
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    /// Shared secret; `None` disables the check
    pub api_key: Option<String>,
}

/// Build the REST router
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/coupons/search", get(search_coupons))
        .route("/api/coupons/:id", get(get_coupon))
        .route("/api/coupons", post(create_coupon))
        .route("/api/merchants", get(list_merchants))
        .route("/api/categories", get(list_categories))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    Router::new()
        .route("/", get(index))
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(docs))
        .merge(api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Check a provided key against the configured one. With no key configured
/// the check is disabled, as in a local development setup.
pub fn authorize(expected: Option<&str>, provided: Option<&str>) -> Result<()> {
    match expected {
        None => Ok(()),
        Some(key) if provided == Some(key) => Ok(()),
        Some(_) => Err(CouponHubError::Unauthorized(
            "Invalid API key".to_string(),
        )),
    }
}

/// Extract `api_key` from a raw query string; keys are opaque tokens, so no
/// percent-decoding is applied
fn key_from_query(query: Option<&str>) -> Option<String> {
    query?
        .split('&')
        .find_map(|pair| pair.strip_prefix("api_key=").map(str::to_string))
}

async fn require_api_key(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let provided = request
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| key_from_query(request.uri().query()));

    match authorize(state.api_key.as_deref(), provided.as_deref()) {
        Ok(()) => next.run(request).await,
        Err(e) => render(Outcome::Failure(e)),
    }
}

fn render(outcome: Outcome) -> Response {
    if let Outcome::Failure(e) = &outcome {
        if !e.is_client_error() {
            tracing::error!("request failed: {}", e);
        }
    }
    let (status, envelope) = outcome.into_rest();
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(envelope)).into_response()
}

/// Service index: name, version, and the endpoint map
async fn index() -> Response {
    Json(json!({
        "name": "Coupon Hub API",
        "version": crate::VERSION,
        "status": "running",
        "endpoints": {
            "docs": "/docs",
            "openapi": "/openapi.json",
            "coupons": {
                "search": "GET /api/coupons/search",
                "getById": "GET /api/coupons/:id",
                "create": "POST /api/coupons",
            },
            "merchants": "GET /api/merchants",
            "categories": "GET /api/categories",
        },
    }))
    .into_response()
}

async fn openapi_json() -> Response {
    Json(openapi::spec()).into_response()
}

/// Minimal documentation page rendering the OpenAPI document
async fn docs() -> Response {
    Html(include_str!("docs.html")).into_response()
}

async fn search_coupons(
    State(state): State<AppState>,
    Query(intent): Query<SearchQuery>,
) -> Response {
    render(Outcome::collection(
        state
            .storage
            .with_connection(|conn| queries::search_coupons(conn, &intent)),
    ))
}

async fn get_coupon(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    render(Outcome::single(
        state
            .storage
            .with_connection(|conn| queries::get_coupon(conn, &id)),
    ))
}

async fn create_coupon(State(state): State<AppState>, Json(draft): Json<CouponDraft>) -> Response {
    let result = draft.validate().and_then(|payload| {
        state
            .storage
            .with_connection(|conn| queries::insert_coupon(conn, &payload))
    });
    render(Outcome::created(result))
}

async fn list_merchants(State(state): State<AppState>, Query(intent): Query<ListQuery>) -> Response {
    render(Outcome::merchants(
        state
            .storage
            .with_connection(|conn| queries::list_merchants(conn, &intent)),
    ))
}

async fn list_categories(
    State(state): State<AppState>,
    Query(intent): Query<ListQuery>,
) -> Response {
    render(Outcome::categories(
        state
            .storage
            .with_connection(|conn| queries::list_categories(conn, &intent)),
    ))
}
