//! Administrative control surface.
//!
//! A separate HTTP server that reads and writes the live configuration,
//! exposes the transaction and meta logs, handles the one-off meta chat,
//! and restarts the gateway.

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::http::server::AppState;
use self::handlers::*;

pub fn admin_router(state: AppState) -> Router {
    Router::new()
        .route("/api/prompt", get(get_prompt).post(set_prompt))
        .route("/api/meta_prompt", get(get_meta_prompt).post(set_meta_prompt))
        .route("/api/settings", get(get_settings).post(set_settings))
        .route("/api/logs", get(get_logs))
        .route("/api/meta_logs", get(get_meta_logs))
        .route("/api/restart", post(restart))
        .route("/api/meta_chat", post(meta_chat))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
