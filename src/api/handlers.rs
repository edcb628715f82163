//! Request Handlers
//!
//! Every handler goes through one engine behind a mutex. The lock is held
//! for the whole of `process_bet`, so a decision is always recorded exactly
//! once before the next bet is decided.

use super::{
    errors::ApiError,
    middleware::RequestId,
    models::*,
    monitoring::MetricsRegistry,
};
use crate::errors::GameError;
use crate::games::{BetId, BetProcessor, BetResult, HouseStats};
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

/// Shared application state
pub struct AppState {
    pub engine: Mutex<BetProcessor>,
    pub metrics: Arc<MetricsRegistry>,
    pub version: String,
}

impl AppState {
    pub fn new(engine: BetProcessor) -> Self {
        Self {
            engine: Mutex::new(engine),
            metrics: Arc::new(MetricsRegistry::new()),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn lock_engine(&self, request_id: &str) -> Result<MutexGuard<'_, BetProcessor>, ApiError> {
        self.engine.lock().map_err(|_| {
            ApiError::internal_error(request_id.to_string(), "Engine state is poisoned".to_string())
        })
    }
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
        version: state.version.clone(),
    })
}

/// GET /bets
pub async fn catalog_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let engine = state.lock_engine(&request_id.0)?;
    let bets = engine.catalog().options().iter().map(BetOptionView::from).collect();
    Ok(Json(CatalogResponse { bets }))
}

/// POST /bets/:id
pub async fn place_bet_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(bet_param): Path<String>,
) -> Result<Json<BetResult>, ApiError> {
    let bet_id = bet_param.parse::<BetId>().map_err(|_| {
        ApiError::bad_request(
            request_id.0.clone(),
            format!("Invalid bet id: '{}'. Use a numeric bet identifier", bet_param),
        )
    })?;

    let outcome = {
        let mut engine = state.lock_engine(&request_id.0)?;
        engine.process_bet(bet_id)
    };

    match outcome {
        Ok(result) => {
            state.metrics.record_bet(result.is_win);
            Ok(Json(result))
        }
        Err(e) => {
            if matches!(e, GameError::InvalidBet(_)) {
                state.metrics.record_invalid_bet();
            }
            warn!(request_id = %request_id.0, bet_id, error = %e, "bet rejected");
            Err(ApiError::from_game(request_id.0, e))
        }
    }
}

/// GET /stats
pub async fn stats_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<HouseStats>, ApiError> {
    let engine = state.lock_engine(&request_id.0)?;
    Ok(Json(engine.stats()))
}

/// GET /history
pub async fn history_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let engine = state.lock_engine(&request_id.0)?;
    Ok(Json(HistoryResponse {
        entries: engine.recent_history(),
    }))
}

/// POST /reset
pub async fn reset_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<HouseStats>, ApiError> {
    let stats = {
        let mut engine = state.lock_engine(&request_id.0)?;
        engine.reset();
        engine.stats()
    };
    state.metrics.record_reset();
    info!(request_id = %request_id.0, "statistics reset via API");
    Ok(Json(stats))
}

/// GET /metrics
pub async fn metrics_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.lock_engine(&request_id.0)?.stats();
    let body = state.metrics.to_prometheus_format(&stats);
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    ))
}
