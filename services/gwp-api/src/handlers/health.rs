//! Health and metrics handlers.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use gwp_protocol::media_types;
use gwp_protocol::responses::{HealthResponse, ReadyResponse};

use crate::state::AppState;

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /ready - Readiness check
///
/// The service can always answer from simulated features, so it is ready
/// either way; `raster` reports which mode it is in.
pub async fn ready_handler(Extension(state): Extension<Arc<AppState>>) -> Json<ReadyResponse> {
    let raster = if state.sampler.is_map_backed() {
        "loaded"
    } else {
        "simulated"
    };

    Json(ReadyResponse {
        ready: true,
        raster: raster.to_string(),
        weather: state.weather.status().to_string(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match &state.prometheus {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, media_types::PROMETHEUS)],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed\n").into_response(),
    }
}
