//! Advanced analysis endpoints.
//!
//! Each handler validates the coordinate against the district, samples the
//! site features and hands them to the matching `gwp_engine::analysis`
//! function. Analyses with synthetic variation draw from [`analysis_rng`], so
//! the same request returns the same answer.

use std::sync::Arc;

use axum::extract::Extension;
use chrono::Local;
use gwp_engine::analysis;
use gwp_protocol::analysis::{
    AlertsResponse, AquiferResponse, BorewellRecommendationResponse, CommunityAtlasResponse,
    ComplianceResponse, CostBenefitResponse, CropSuitabilityResponse, DroughtRiskResponse,
    ForecastResponse, NearbySourcesResponse, RainfallImpactResponse, RechargeZonesResponse,
    TemporalAnalysisResponse, TimelapseResponse,
};
use gwp_protocol::requests::{
    AlertsRequest, ForecastRequest, MonthsRequest, PointRequest, RadiusRequest, RainfallRequest,
};
use tracing::{info, warn};

use super::{analysis_rng, count_request, locate};
use crate::error::{ApiResult, Json};
use crate::state::AppState;

/// Default search radius for drill sites, km.
const DRILL_SEARCH_RADIUS_KM: f64 = 0.5;
/// Default search radius for surface water, km.
const WATER_SEARCH_RADIUS_KM: f64 = 5.0;

const LIVE_FORECAST_SOURCE: &str = "OpenWeatherMap API (Live)";
const SIMULATED_FORECAST_SOURCE: &str = "Simulated (Weather API unavailable)";

// RNG salts, one per analysis
const SALT_TEMPORAL: u64 = 1;
const SALT_DRILL_SITES: u64 = 2;
const SALT_ATLAS: u64 = 3;
const SALT_AQUIFER: u64 = 4;
const SALT_TIMELAPSE: u64 = 5;
const SALT_FORECAST: u64 = 6;

/// POST /api/temporal-analysis
pub async fn temporal_analysis_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<MonthsRequest>,
) -> ApiResult<Json<TemporalAnalysisResponse>> {
    count_request("temporal-analysis");
    let location = req.coordinate()?;
    let months = req.months()?;
    let site = locate(&state.sampler, location)?;

    let today = Local::now().date_naive();
    let mut rng = analysis_rng(location, SALT_TEMPORAL);
    let series = analysis::temporal_analysis(&site, months, today, &mut rng);

    Ok(Json(TemporalAnalysisResponse {
        success: true,
        location,
        temporal_data: series.samples,
        current_status: site.gwp_class,
        trend: series.trend.to_string(),
        change_percent: series.change_percent,
        analysis: series.analysis,
    }))
}

/// POST /api/borewell-recommendation
pub async fn borewell_recommendation_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<RadiusRequest>,
) -> ApiResult<Json<BorewellRecommendationResponse>> {
    count_request("borewell-recommendation");
    let center = req.coordinate()?;
    let radius_km = req.radius_or(DRILL_SEARCH_RADIUS_KM)?;
    state.sampler.require_inside(center)?;

    let mut rng = analysis_rng(center, SALT_DRILL_SITES);
    let (sites, scanned_points) =
        analysis::borewell_recommendation(&state.sampler, center, radius_km, &mut rng);

    Ok(Json(BorewellRecommendationResponse {
        success: true,
        center,
        radius_km,
        scanned_points,
        best_location: sites.first().cloned(),
        analysis: analysis::borewell::recommendation_summary(&sites),
        recommendations: sites,
    }))
}

/// POST /api/recharge-zones
pub async fn recharge_zones_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> ApiResult<Json<RechargeZonesResponse>> {
    count_request("recharge-zones");
    let location = req.coordinate()?;
    let site = locate(&state.sampler, location)?;
    Ok(Json(analysis::recharge_zones(location, &site)))
}

/// POST /api/crop-suitability
pub async fn crop_suitability_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> ApiResult<Json<CropSuitabilityResponse>> {
    count_request("crop-suitability");
    let location = req.coordinate()?;
    let site = locate(&state.sampler, location)?;
    Ok(Json(analysis::crop_suitability(location, &site)))
}

/// POST /api/drought-risk
pub async fn drought_risk_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> ApiResult<Json<DroughtRiskResponse>> {
    count_request("drought-risk");
    let location = req.coordinate()?;
    let site = locate(&state.sampler, location)?;
    Ok(Json(analysis::drought_risk(location, &site)))
}

/// POST /api/rainfall-impact
pub async fn rainfall_impact_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<RainfallRequest>,
) -> ApiResult<Json<RainfallImpactResponse>> {
    count_request("rainfall-impact");
    let location = req.coordinate()?;
    let rainfall_mm = req.rainfall_mm()?;
    let site = locate(&state.sampler, location)?;
    Ok(Json(analysis::rainfall_impact(location, &site, rainfall_mm)))
}

/// POST /api/community-atlas
pub async fn community_atlas_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> ApiResult<Json<CommunityAtlasResponse>> {
    count_request("community-atlas");
    let location = req.coordinate()?;
    state.sampler.require_inside(location)?;

    let mut rng = analysis_rng(location, SALT_ATLAS);
    Ok(Json(analysis::community_atlas(&state.sampler, location, &mut rng)))
}

/// POST /api/aquifer-3d
pub async fn aquifer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> ApiResult<Json<AquiferResponse>> {
    count_request("aquifer-3d");
    let location = req.coordinate()?;
    let site = locate(&state.sampler, location)?;

    let mut rng = analysis_rng(location, SALT_AQUIFER);
    Ok(Json(analysis::aquifer_profile(location, &site, &mut rng)))
}

/// POST /api/cost-benefit
pub async fn cost_benefit_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> ApiResult<Json<CostBenefitResponse>> {
    count_request("cost-benefit");
    let location = req.coordinate()?;
    let site = locate(&state.sampler, location)?;
    Ok(Json(analysis::cost_benefit(location, &site)))
}

/// POST /api/nearby-sources
pub async fn nearby_sources_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<RadiusRequest>,
) -> ApiResult<Json<NearbySourcesResponse>> {
    count_request("nearby-sources");
    let location = req.coordinate()?;
    let radius_km = req.radius_or(WATER_SEARCH_RADIUS_KM)?;
    state.sampler.require_inside(location)?;

    Ok(Json(analysis::nearby_sources(
        location,
        radius_km,
        &state.config.water_sources,
    )))
}

/// POST /api/satellite-timelapse
pub async fn satellite_timelapse_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<MonthsRequest>,
) -> ApiResult<Json<TimelapseResponse>> {
    count_request("satellite-timelapse");
    let location = req.coordinate()?;
    let months = req.months()?;
    let site = locate(&state.sampler, location)?;

    let today = Local::now().date_naive();
    let mut rng = analysis_rng(location, SALT_TIMELAPSE);
    let timelapse = analysis::satellite_timelapse(&site, months, today, &mut rng);

    Ok(Json(TimelapseResponse {
        location,
        time_period_months: months,
        current_values: timelapse.current,
        time_series: timelapse.frames,
        trends: timelapse.trends,
        insights: timelapse.insights,
    }))
}

/// POST /api/compliance-check
pub async fn compliance_check_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PointRequest>,
) -> ApiResult<Json<ComplianceResponse>> {
    count_request("compliance-check");
    let location = req.coordinate()?;
    let site = locate(&state.sampler, location)?;
    Ok(Json(analysis::compliance_check(location, site.gwp_class)))
}

/// POST /api/alerts-setup
pub async fn alerts_setup_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<AlertsRequest>,
) -> ApiResult<Json<AlertsResponse>> {
    count_request("alerts-setup");
    let location = req.coordinate()?;
    let site = locate(&state.sampler, location)?;

    let response = analysis::alert_subscription(
        location,
        site.gwp_class,
        req.email(),
        req.phone(),
        Local::now().naive_local(),
    )?;
    info!(
        subscription_id = %response.subscription.subscription_id,
        "Registered groundwater alerts"
    );
    Ok(Json(response))
}

/// POST /api/precipitation-forecast
///
/// Uses the live forecast when available and a simulated outlook otherwise.
pub async fn precipitation_forecast_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<ForecastRequest>,
) -> ApiResult<Json<ForecastResponse>> {
    count_request("precipitation-forecast");
    let location = req.coordinate()?;
    let days = req.days()?;
    let site = locate(&state.sampler, location)?;

    let (daily, source, note) = match state.weather.forecast(location, days).await {
        Ok(slots) => (
            analysis::forecast::aggregate_daily(&slots),
            LIVE_FORECAST_SOURCE,
            None,
        ),
        Err(e) => {
            warn!(error = %e, "Forecast unavailable, using simulated outlook");
            let mut rng = analysis_rng(location, SALT_FORECAST);
            let today = Local::now().date_naive();
            (
                analysis::forecast::simulated_daily(days, today, &mut rng),
                SIMULATED_FORECAST_SOURCE,
                Some(format!("API Error: {}", e)),
            )
        }
    };

    Ok(Json(analysis::precipitation_forecast(
        location,
        site.gwp_class,
        daily,
        source,
        note,
    )))
}
