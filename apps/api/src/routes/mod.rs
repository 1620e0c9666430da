pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::generation::handlers as strategy;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(strategy::handle_options))
        // Session API
        .route("/api/v1/session/login", post(session::handle_login))
        .route("/api/v1/session", delete(session::handle_logout))
        // Strategy API
        .route("/api/v1/strategies", post(strategy::handle_generate))
        .route(
            "/api/v1/strategies/latest/csv",
            get(strategy::handle_latest_csv),
        )
        // History API
        .route("/api/v1/history", get(session::handle_history))
        .route(
            "/api/v1/history/:index/csv",
            get(session::handle_history_csv),
        )
        .with_state(state)
}
