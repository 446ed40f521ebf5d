//! Router assembly: HTTP endpoints, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST API under `/api/v1/...`
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/score", post(http::http_score))
        .route("/api/v1/generate_scenario", post(http::http_generate_scenario))
        .route("/api/v1/generate_lesson", post(http::http_generate_lesson))
        .route("/api/v1/generate_quiz", post(http::http_generate_quiz))
        .route("/api/v1/generate_game_item", post(http::http_generate_game_item))
        .route("/api/v1/telemetry", post(http::http_telemetry))
        .route("/api/v1/update_score", post(http::http_update_score))
        .route("/api/v1/leaderboard", get(http::http_leaderboard))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
