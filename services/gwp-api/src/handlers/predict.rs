//! Point, borewell, batch, area and comparison predictions.

use std::sync::Arc;

use axum::extract::Extension;
use gwp_common::{Coordinate, GwpError};
use gwp_engine::{analysis, explain, predict, xai};
use gwp_protocol::analysis::{AreaAnalysisResponse, BorewellInputs, BorewellPredictResponse};
use gwp_protocol::requests::{AreaRequest, BatchRequest, BorewellPredictRequest, ComparisonRequest, PointRequest};
use gwp_protocol::{BatchResult, ComparisonResult, PredictionResult};
use tracing::{debug, info};

use super::{count_request, locate, timestamp};
use crate::error::{ApiError, ApiResult, Json};
use crate::state::AppState;

/// POST /api/predict
pub async fn predict_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> ApiResult<Json<PredictionResult>> {
    count_request("predict");
    let location = req.coordinate()?;
    let sampler = &state.sampler;

    if !sampler.contains(location) {
        return Err(ApiError::from(GwpError::OutsideDistrict(sampler.district().to_string()))
            .with_bounds(*sampler.bounds()));
    }

    let site = sampler.sample(location);
    let weather = state.weather.current(location).await;
    let xai = xai::explain(&site);

    metrics::counter!("gwp_predictions_total", "class" => site.gwp_class.as_str()).increment(1);
    debug!(lat = location.lat, lon = location.lon, class = %site.gwp_class, "Predicted");

    Ok(Json(PredictionResult {
        success: true,
        location,
        prediction: predict::prediction(&site, sampler.confidence()),
        weather,
        explanation: explain::explain_prediction(&site),
        xai,
        timestamp: timestamp(),
        data_source: site.data_source.to_string(),
    }))
}

/// POST /api/borewell-predict
pub async fn borewell_predict_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<BorewellPredictRequest>,
) -> ApiResult<Json<BorewellPredictResponse>> {
    count_request("borewell-predict");
    let location = req.coordinate()?;
    let depth = req.depth()?;
    let season = req.season().to_string();

    let site = locate(&state.sampler, location)?;
    let (result, recommendations) = analysis::borewell_predict(&site, depth, &season);

    Ok(Json(BorewellPredictResponse {
        success: true,
        location,
        inputs: BorewellInputs {
            planned_depth: depth,
            season,
        },
        result,
        recommendations,
    }))
}

/// POST /api/batch-predict
pub async fn batch_predict_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<BatchRequest>,
) -> ApiResult<Json<BatchResult>> {
    count_request("batch-predict");
    let limit = state.config.limits.max_batch;
    if req.coordinates.len() > limit {
        return Err(GwpError::TooManyCoordinates(limit).into());
    }

    let coords = req
        .coordinates
        .iter()
        .map(|c| c.coordinate())
        .collect::<Result<Vec<Coordinate>, _>>()?;

    let results = predict::batch_predict(&state.sampler, &coords);
    for (class, count) in predict::class_counts(&results) {
        metrics::counter!("gwp_predictions_total", "class" => class.as_str()).increment(count as u64);
    }
    info!(
        total = coords.len(),
        failed = results.iter().filter(|r| r.is_error()).count(),
        "Batch prediction"
    );

    Ok(Json(BatchResult {
        success: true,
        total_locations: coords.len(),
        results,
        timestamp: timestamp(),
    }))
}

/// POST /api/area-analysis
pub async fn area_analysis_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<AreaRequest>,
) -> ApiResult<Json<AreaAnalysisResponse>> {
    count_request("area-analysis");
    let center = req.center()?;
    let radius_km = req.radius_km()?;

    let analysis = analysis::area_analysis(&state.sampler, center, radius_km)?;

    Ok(Json(AreaAnalysisResponse {
        success: true,
        center,
        radius_km,
        analysis,
        timestamp: timestamp(),
    }))
}

/// POST /api/comparison
pub async fn comparison_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<ComparisonRequest>,
) -> ApiResult<Json<ComparisonResult>> {
    count_request("comparison");
    let limit = state.config.limits.max_comparison;
    if req.locations.len() > limit {
        return Err(GwpError::TooManyLocations(limit).into());
    }

    let named = req
        .locations
        .iter()
        .enumerate()
        .map(|(i, loc)| Ok((loc.display_name(i), loc.coordinate()?)))
        .collect::<Result<Vec<(String, Coordinate)>, GwpError>>()?;

    let (comparisons, best_location) = predict::compare_locations(&state.sampler, &named);

    Ok(Json(ComparisonResult {
        success: true,
        total_compared: comparisons.len(),
        comparisons,
        best_location,
        timestamp: timestamp(),
    }))
}
