//! District metadata: system status, map bounds, statistics and the overlay.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use gwp_engine::predict;
use gwp_protocol::media_types;
use gwp_protocol::responses::SystemStatusResponse;
use gwp_protocol::{MapBoundsResponse, StatisticsResponse};

use super::count_request;
use crate::state::AppState;

/// GET /api/system-status
pub async fn system_status_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<SystemStatusResponse> {
    count_request("system-status");
    let loaded = state.sampler.is_map_backed();
    let path = &state.config.overlay_path;

    let (message, fix) = if loaded {
        (
            format!("Using REAL data from {}", path.display()),
            "All good!".to_string(),
        )
    } else {
        (
            format!("⚠️ WARNING: Using SIMULATED data - {} not loaded!", path.display()),
            "Place the overlay at the configured overlay_path and restart the service".to_string(),
        )
    };

    Json(SystemStatusResponse {
        actual_data_loaded: loaded,
        gwp_image_path: path.display().to_string(),
        gwp_image_exists: path.exists(),
        data_dir: data_dir(path),
        message,
        fix,
    })
}

fn data_dir(overlay: &Path) -> String {
    match overlay.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.display().to_string(),
        _ => ".".to_string(),
    }
}

/// GET /api/map-bounds
pub async fn map_bounds_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<MapBoundsResponse> {
    count_request("map-bounds");
    Json(MapBoundsResponse::from(state.sampler.bounds()))
}

/// GET /api/statistics
pub async fn statistics_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<StatisticsResponse> {
    count_request("statistics");
    Json(predict::district_statistics(&state.sampler))
}

/// GET /gwp_overlay.png
pub async fn overlay_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match &state.overlay_png {
        Some(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, media_types::PNG),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            bytes.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(gwp_protocol::ErrorResponse::new("GWP overlay not available")),
        )
            .into_response(),
    }
}
