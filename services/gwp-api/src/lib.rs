//! GWP API Service Library
//!
//! HTTP server for groundwater potential prediction over a district: point
//! and batch predictions with explanations, plus the advanced analyses built
//! on the same sampled features.

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod weather;

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health and metrics
        .route("/health", get(handlers::health_handler))
        .route("/ready", get(handlers::ready_handler))
        .route("/metrics", get(handlers::metrics_handler))
        // District metadata
        .route("/gwp_overlay.png", get(handlers::overlay_handler))
        .route("/api/system-status", get(handlers::system_status_handler))
        .route("/api/map-bounds", get(handlers::map_bounds_handler))
        .route("/api/statistics", get(handlers::statistics_handler))
        // Predictions
        .route("/api/predict", post(handlers::predict_handler))
        .route("/api/borewell-predict", post(handlers::borewell_predict_handler))
        .route("/api/batch-predict", post(handlers::batch_predict_handler))
        .route("/api/area-analysis", post(handlers::area_analysis_handler))
        .route("/api/comparison", post(handlers::comparison_handler))
        // Advanced analyses
        .route("/api/temporal-analysis", post(handlers::temporal_analysis_handler))
        .route(
            "/api/borewell-recommendation",
            post(handlers::borewell_recommendation_handler),
        )
        .route("/api/recharge-zones", post(handlers::recharge_zones_handler))
        .route("/api/crop-suitability", post(handlers::crop_suitability_handler))
        .route("/api/drought-risk", post(handlers::drought_risk_handler))
        .route("/api/rainfall-impact", post(handlers::rainfall_impact_handler))
        .route("/api/community-atlas", post(handlers::community_atlas_handler))
        .route("/api/aquifer-3d", post(handlers::aquifer_handler))
        .route("/api/cost-benefit", post(handlers::cost_benefit_handler))
        .route("/api/nearby-sources", post(handlers::nearby_sources_handler))
        .route(
            "/api/satellite-timelapse",
            post(handlers::satellite_timelapse_handler),
        )
        .route("/api/compliance-check", post(handlers::compliance_check_handler))
        .route("/api/alerts-setup", post(handlers::alerts_setup_handler))
        .route(
            "/api/precipitation-forecast",
            post(handlers::precipitation_forecast_handler),
        )
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
