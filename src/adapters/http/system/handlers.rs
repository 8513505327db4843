//! HTTP handlers for service health and statistics.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::domain_error_response;
use crate::application::GetStatsHandler;

use super::dto::HealthResponse;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SystemHandlers {
    stats_handler: Arc<GetStatsHandler>,
}

impl SystemHandlers {
    pub fn new(stats_handler: Arc<GetStatsHandler>) -> Self {
        Self { stats_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Service liveness
pub async fn health() -> Response {
    (StatusCode::OK, Json(HealthResponse::ok())).into_response()
}

/// GET /stats - Stored entity counts
pub async fn get_stats(State(handlers): State<SystemHandlers>) -> Response {
    match handlers.stats_handler.handle().await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => domain_error_response(e),
    }
}
