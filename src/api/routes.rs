//! Route Definitions

use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Build the API router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // Catalog and play
        .route("/bets", get(catalog_handler))
        .route("/bets/:id", post(place_bet_handler))
        // Statistics
        .route("/stats", get(stats_handler))
        .route("/history", get(history_handler))
        .route("/reset", post(reset_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
