//! Responses of the advanced analysis endpoints.
//!
//! Every analysis is anchored on a single coordinate (or an area centre) and
//! derived from the groundwater class and spectral indices sampled there.

use gwp_common::{Coordinate, GwpClass};
use serde::{Deserialize, Serialize};

use crate::sources::WaterSource;

/// A number, or a label when the number is not meaningful.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueOrLabel<T> {
    Value(T),
    Label(String),
}

// ============================================================================
// Borewell predictor
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BorewellPredictResponse {
    pub success: bool,
    pub location: Coordinate,
    pub inputs: BorewellInputs,
    pub result: BorewellOutcome,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BorewellInputs {
    pub planned_depth: i64,
    pub season: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BorewellOutcome {
    pub groundwater_class: GwpClass,
    pub success_probability: f64,
    pub expected_yield: String,
}

// ============================================================================
// Area analysis
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AreaAnalysisResponse {
    pub success: bool,
    pub center: Coordinate,
    pub radius_km: f64,
    pub analysis: AreaAnalysis,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AreaAnalysis {
    pub total_samples: usize,
    pub distribution: AreaDistribution,
    pub averages: IndexAverages,
    /// 2 (poor) to 5 (excellent).
    pub rating: u8,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AreaDistribution {
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
    pub high_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexAverages {
    pub ndvi: f64,
    pub ndwi: f64,
    pub elevation: f64,
}

// ============================================================================
// Temporal analysis
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemporalAnalysisResponse {
    pub success: bool,
    pub location: Coordinate,
    pub temporal_data: Vec<MonthlySample>,
    pub current_status: GwpClass,
    /// `improving`, `declining` or `stable`.
    pub trend: String,
    pub change_percent: f64,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySample {
    pub month: u32,
    pub year: i32,
    pub ndvi: f64,
    pub ndwi: f64,
    pub gwp_class: GwpClass,
    pub gwp_value: f64,
}

// ============================================================================
// Borewell recommendation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BorewellRecommendationResponse {
    pub success: bool,
    pub center: Coordinate,
    pub radius_km: f64,
    pub scanned_points: usize,
    pub recommendations: Vec<DrillSite>,
    pub best_location: Option<DrillSite>,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrillSite {
    pub lat: f64,
    pub lon: f64,
    pub score: f64,
    pub gwp_class: GwpClass,
    pub estimated_depth_ft: u32,
    /// Percent, 0-100.
    pub success_probability: u32,
    /// Rupees.
    pub estimated_cost: u32,
}

// ============================================================================
// Recharge zones
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RechargeZonesResponse {
    pub success: bool,
    pub location: Coordinate,
    pub recharge_potential: String,
    pub recharge_score: f64,
    pub factors: RechargeFactors,
    pub recommended_structures: Vec<String>,
    pub estimated_capacity: String,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RechargeFactors {
    pub vegetation: String,
    pub elevation: String,
    pub soil_moisture: String,
}

// ============================================================================
// Crop suitability
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropSuitabilityResponse {
    pub success: bool,
    pub location: Coordinate,
    pub groundwater_status: GwpClass,
    pub suitable_crops: Vec<Crop>,
    pub irrigation_advice: String,
    pub best_season: String,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crop {
    pub name: String,
    pub water_req: String,
    #[serde(rename = "yield")]
    pub expected_yield: String,
    pub profit: String,
}

// ============================================================================
// Drought risk
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DroughtRiskResponse {
    pub success: bool,
    pub location: Coordinate,
    pub risk_level: String,
    pub risk_score: f64,
    pub alert_color: String,
    pub vulnerability_factors: VulnerabilityFactors,
    pub recommendations: Vec<String>,
    pub estimated_days_to_crisis: i32,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VulnerabilityFactors {
    pub groundwater: GwpClass,
    pub vegetation_health: String,
    pub soil_moisture: String,
}

// ============================================================================
// Rainfall impact
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RainfallImpactResponse {
    pub success: bool,
    pub location: Coordinate,
    pub current_status: GwpState,
    pub after_rainfall: GwpProjection,
    pub rainfall_input_mm: f64,
    pub recharge_mm: f64,
    pub recharge_rate_percent: f64,
    pub recharge_time_days: i64,
    pub rainfall_deficit_mm: f64,
    pub analysis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GwpState {
    pub gwp_class: GwpClass,
    pub gwp_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GwpProjection {
    pub gwp_class: GwpClass,
    pub gwp_value: f64,
    pub improvement: f64,
}

// ============================================================================
// Community atlas
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityAtlasResponse {
    pub location: Coordinate,
    pub gwp_class: GwpClass,
    pub total_reports: usize,
    pub successful_borewells: usize,
    pub success_rate: f64,
    pub statistics: AtlasStatistics,
    /// At most ten reports.
    pub nearby_borewells: Vec<BorewellReport>,
    pub recommendation: String,
    pub data_source_note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtlasStatistics {
    pub average_depth_ft: f64,
    pub average_yield_lpm: f64,
    /// `null` when no report falls inside the district.
    pub depth_range: Option<DepthRange>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DepthRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BorewellReport {
    pub id: String,
    pub location: Coordinate,
    pub depth_ft: u32,
    pub depth_m: f64,
    pub yield_lpm: u32,
    pub success: bool,
    pub water_quality: String,
    pub drilling_year: i32,
    pub cost_inr: u32,
    pub reported_by: String,
}

// ============================================================================
// Aquifer profile
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AquiferResponse {
    pub location: Coordinate,
    pub gwp_class: GwpClass,
    pub surface_elevation_m: f64,
    pub water_table_depth_m: f64,
    pub water_table_elevation_m: f64,
    pub total_aquifer_thickness_m: f64,
    pub layers: Vec<AquiferLayer>,
    pub drilling_recommendation: DrillingRecommendation,
    pub visualization_data: VisualizationData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AquiferLayer {
    pub name: String,
    pub depth_from_m: f64,
    pub depth_to_m: f64,
    pub thickness_m: f64,
    pub material: String,
    pub permeability: String,
    pub water_bearing: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub yield_potential: Option<GwpClass>,
    /// Hex colour used by the 3D viewer.
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrillingRecommendation {
    pub recommended_depth_m: f64,
    pub recommended_depth_ft: f64,
    pub target_layers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualizationData {
    pub mesh_points: Vec<MeshPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshPoint {
    pub layer: String,
    pub top: f64,
    pub bottom: f64,
    pub color: String,
}

// ============================================================================
// Cost-benefit
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBenefitResponse {
    pub location: Coordinate,
    pub gwp_class: GwpClass,
    /// Percent, 0-100.
    pub success_probability: f64,
    pub cost_breakdown: CostBreakdown,
    pub expected_benefits: ExpectedBenefits,
    pub roi_analysis: RoiAnalysis,
    pub recommendation: String,
    pub risk_factors: Vec<String>,
}

/// Rupee amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub drilling_cost: i64,
    pub casing_cost: i64,
    pub pump_and_equipment: i64,
    pub electricity_connection: i64,
    pub miscellaneous: i64,
    pub total_investment: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpectedBenefits {
    pub daily_water_yield_liters: i64,
    pub yearly_water_m3: i64,
    pub irrigable_area_acres: f64,
    pub yearly_crop_income_inr: i64,
    pub operational_cost_yearly_inr: i64,
    pub net_yearly_benefit_inr: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoiAnalysis {
    pub payback_period_years: ValueOrLabel<f64>,
    pub roi_5_years_percent: f64,
    pub roi_10_years_percent: f64,
    pub npv_10_years: i64,
    pub break_even_month: ValueOrLabel<i64>,
}

// ============================================================================
// Nearby water sources
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbySourcesResponse {
    pub location: Coordinate,
    pub search_radius_km: f64,
    pub total_sources_found: usize,
    pub nearest_source: Option<SourceHit>,
    /// Sorted by distance, nearest first.
    pub water_sources: Vec<SourceHit>,
    pub recommendations: Vec<String>,
    pub recharge_potential: String,
}

/// A configured water body with its distance from the query point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceHit {
    #[serde(flatten)]
    pub source: WaterSource,
    pub distance_km: f64,
    /// `High` under 2 km, `Medium` under 4 km, else `Low`.
    pub feasibility: String,
}

// ============================================================================
// Satellite time-lapse
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelapseResponse {
    pub location: Coordinate,
    pub time_period_months: u32,
    pub current_values: CurrentIndices,
    pub time_series: Vec<TimelapseFrame>,
    pub trends: IndexTrends,
    pub insights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentIndices {
    pub ndvi: f64,
    pub ndwi: f64,
    pub gwp_class: GwpClass,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelapseFrame {
    /// `YYYY-MM`
    pub date: String,
    /// `Month YYYY`
    pub month: String,
    pub ndvi: f64,
    pub ndwi: f64,
    pub gwp_estimate: GwpClass,
    pub vegetation_health: String,
    pub water_stress: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexTrends {
    pub ndvi_trend: String,
    pub ndwi_trend: String,
    pub average_ndvi: f64,
    pub average_ndwi: f64,
}

// ============================================================================
// Compliance
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComplianceResponse {
    pub location: Coordinate,
    pub gwp_class: GwpClass,
    pub compliance_score: i32,
    pub compliance_status: String,
    pub regulations: Vec<Regulation>,
    pub permits_required: Vec<String>,
    pub restrictions: Vec<String>,
    pub documents_needed: Vec<String>,
    pub processing_time: String,
    pub estimated_fees: String,
    pub contact_info: AuthorityContacts,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Regulation {
    pub authority: String,
    pub status: String,
    pub regulation: String,
    pub severity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorityContacts {
    pub cgwa_office: String,
    pub state_office: String,
    pub helpline: String,
    pub website: String,
}

// ============================================================================
// Alerts
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertsResponse {
    pub location: Coordinate,
    pub gwp_class: GwpClass,
    pub subscription: Subscription,
    pub contact_info: SubscriberContact,
    pub alert_preferences: Vec<AlertPreference>,
    pub upcoming_alerts: Vec<UpcomingAlert>,
    pub notification_channels: NotificationChannels,
    pub message: String,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscription {
    pub subscription_id: String,
    pub status: String,
    pub created_at: String,
    pub email_verified: bool,
    pub phone_verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriberContact {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertPreference {
    #[serde(rename = "type")]
    pub alert_type: String,
    pub description: String,
    pub frequency: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingAlert {
    pub date: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationChannels {
    pub email: Channel,
    pub whatsapp: Channel,
    pub sms: Channel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    pub enabled: bool,
    pub frequency: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
}

// ============================================================================
// Precipitation forecast
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResponse {
    pub location: Coordinate,
    pub current_gwp: GwpClass,
    pub forecast_period_days: usize,
    pub daily_forecast: Vec<DailyForecast>,
    pub summary: ForecastSummary,
    pub impact_on_groundwater: GroundwaterImpact,
    pub recommendations: Vec<String>,
    pub data_source: String,
    /// Why the live forecast was not used.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecast {
    /// `YYYY-MM-DD`
    pub date: String,
    pub total_precipitation_mm: f64,
    pub avg_temp_c: f64,
    pub avg_humidity: f64,
    pub groundwater_recharge_potential: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSummary {
    pub total_expected_rainfall_mm: f64,
    pub expected_groundwater_recharge_mm: f64,
    pub rainy_days: usize,
    /// Date of the wettest day, or `N/A`.
    pub peak_rainfall_day: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundwaterImpact {
    pub current_status: GwpClass,
    pub expected_improvement: String,
    pub recharge_potential_rating: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::WaterSourceKind;

    #[test]
    fn test_value_or_label() {
        let viable: ValueOrLabel<f64> = ValueOrLabel::Value(3.2);
        let not_viable: ValueOrLabel<f64> = ValueOrLabel::Label("Not viable".into());
        assert_eq!(serde_json::to_string(&viable).unwrap(), "3.2");
        assert_eq!(serde_json::to_string(&not_viable).unwrap(), "\"Not viable\"");
    }

    #[test]
    fn test_source_hit_is_flat() {
        let hit = SourceHit {
            source: WaterSource {
                name: "Navalur Lake".into(),
                lat: 15.4534,
                lon: 75.0267,
                kind: WaterSourceKind::Lake,
                perennial: None,
                capacity_mcm: Some(2.5),
            },
            distance_km: 1.2,
            feasibility: "High".into(),
        };
        let json = serde_json::to_value(&hit).unwrap();
        assert_eq!(json["name"], "Navalur Lake");
        assert_eq!(json["type"], "lake");
        assert_eq!(json["distance_km"], 1.2);
        assert!(json.get("perennial").is_none());
    }

    #[test]
    fn test_crop_yield_field_name() {
        let crop = Crop {
            name: "Ragi".into(),
            water_req: "Low".into(),
            expected_yield: "10-12 quintals/acre".into(),
            profit: "-".into(),
        };
        let json = serde_json::to_value(&crop).unwrap();
        assert_eq!(json["yield"], "10-12 quintals/acre");
    }
}
