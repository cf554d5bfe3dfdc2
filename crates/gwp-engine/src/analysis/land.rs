//! Recharge, crop, drought and rainfall assessments for one site.

use gwp_common::{round_to, Coordinate, GwpClass};
use gwp_protocol::analysis::{
    Crop, CropSuitabilityResponse, DroughtRiskResponse, GwpProjection, GwpState,
    RainfallImpactResponse, RechargeFactors, RechargeZonesResponse, VulnerabilityFactors,
};

use crate::sampler::SiteFeatures;

// ============================================================================
// Recharge zones
// ============================================================================

pub fn recharge_zones(location: Coordinate, site: &SiteFeatures) -> RechargeZonesResponse {
    let (vegetation_points, vegetation) = if site.ndvi > 0.5 {
        (30, "Excellent")
    } else if site.ndvi > 0.3 {
        (15, "Good")
    } else {
        (5, "Poor")
    };

    let (elevation_points, elevation) = if site.dem < 620.0 {
        (35, "Excellent (Valley/Depression)")
    } else if site.dem < 680.0 {
        (20, "Good (Gentle slope)")
    } else {
        (5, "Poor (High ground)")
    };

    let (moisture_points, soil_moisture) = if site.ndwi > 0.2 {
        (20, "High moisture retention")
    } else {
        (10, "Moderate moisture retention")
    };

    let score: i32 = vegetation_points + elevation_points + moisture_points;
    let (potential, structures): (&str, [&str; 3]) = if score > 70 {
        (
            "Excellent",
            ["Farm Pond (High capacity)", "Percolation Tank", "Check Dam"],
        )
    } else if score > 45 {
        (
            "Good",
            ["Farm Pond (Medium capacity)", "Recharge Shaft", "Contour Bunding"],
        )
    } else {
        (
            "Moderate",
            ["Contour Trenches", "Gully Plugs", "Percolation Pits"],
        )
    };

    RechargeZonesResponse {
        success: true,
        location,
        recharge_potential: potential.to_string(),
        recharge_score: score as f64,
        factors: RechargeFactors {
            vegetation: vegetation.to_string(),
            elevation: elevation.to_string(),
            soil_moisture: soil_moisture.to_string(),
        },
        recommended_structures: structures.iter().map(|s| s.to_string()).collect(),
        estimated_capacity: format!("{} cubic meters/year", score * 100),
        analysis: format!(
            "This location has {} recharge potential. Recommended structures: {}.",
            potential.to_lowercase(),
            structures[..2].join(", ")
        ),
    }
}

// ============================================================================
// Crop suitability
// ============================================================================

fn crop(name: &str, water_req: &str, expected_yield: &str, profit: &str) -> Crop {
    Crop {
        name: name.to_string(),
        water_req: water_req.to_string(),
        expected_yield: expected_yield.to_string(),
        profit: profit.to_string(),
    }
}

fn crops_for(class: GwpClass) -> (Vec<Crop>, &'static str) {
    match class {
        GwpClass::High => (
            vec![
                crop("Sugarcane", "High", "80-100 tons/acre", "₹2.5-3.5L/acre"),
                crop("Banana", "High", "30-40 tons/acre", "₹2-3L/acre"),
                crop("Rice (Paddy)", "High", "25-30 quintals/acre", "₹60-80K/acre"),
                crop("Vegetables", "Medium-High", "Varies", "₹1-2L/acre"),
            ],
            "Drip irrigation recommended for water efficiency",
        ),
        GwpClass::Moderate => (
            vec![
                crop("Cotton", "Medium", "8-12 quintals/acre", "₹50-70K/acre"),
                crop("Maize", "Medium", "20-25 quintals/acre", "₹40-60K/acre"),
                crop("Soybean", "Medium", "10-15 quintals/acre", "₹35-50K/acre"),
                crop("Sunflower", "Low-Medium", "8-10 quintals/acre", "₹30-45K/acre"),
            ],
            "Supplemental irrigation during critical stages",
        ),
        GwpClass::Low => (
            vec![
                crop("Ragi (Finger Millet)", "Low", "10-12 quintals/acre", "₹25-35K/acre"),
                crop("Jowar (Sorghum)", "Low", "12-15 quintals/acre", "₹20-30K/acre"),
                crop("Red Gram (Tur)", "Low", "6-8 quintals/acre", "₹30-40K/acre"),
                crop("Groundnut", "Low", "8-10 quintals/acre", "₹25-35K/acre"),
            ],
            "Rainwater harvesting essential, drought-resistant varieties recommended",
        ),
    }
}

pub fn crop_suitability(location: Coordinate, site: &SiteFeatures) -> CropSuitabilityResponse {
    let (suitable_crops, advice) = crops_for(site.gwp_class);
    let top = suitable_crops
        .first()
        .map(|c| c.name.clone())
        .unwrap_or_default();

    CropSuitabilityResponse {
        success: true,
        location,
        groundwater_status: site.gwp_class,
        analysis: format!(
            "Based on {} groundwater potential, {} crops are suitable. Top recommendation: {}.",
            site.gwp_class.as_str().to_lowercase(),
            suitable_crops.len(),
            top
        ),
        suitable_crops,
        irrigation_advice: advice.to_string(),
        best_season: "Kharif (Monsoon) for optimal water availability".to_string(),
    }
}

// ============================================================================
// Drought risk
// ============================================================================

pub fn drought_risk(location: Coordinate, site: &SiteFeatures) -> DroughtRiskResponse {
    let mut score = site.gwp_class.pick(5.0, 20.0, 40.0);
    if site.ndvi < 0.3 {
        score += 30.0;
    } else if site.ndvi < 0.5 {
        score += 15.0;
    }
    if site.ndwi < 0.0 {
        score += 30.0;
    } else if site.ndwi < 0.2 {
        score += 15.0;
    }

    let (level, color, recommendations): (&str, &str, [&str; 4]) = if score > 70.0 {
        (
            "Critical",
            "red",
            [
                "Immediate water conservation measures required",
                "Consider water tanker arrangement",
                "Shift to drought-resistant crops",
                "Implement strict irrigation scheduling",
            ],
        )
    } else if score > 40.0 {
        (
            "High",
            "orange",
            [
                "Monitor groundwater levels closely",
                "Reduce water-intensive crops",
                "Install water-saving irrigation systems",
                "Build rainwater harvesting structures",
            ],
        )
    } else {
        (
            "Moderate",
            "yellow",
            [
                "Continue normal agricultural activities",
                "Maintain existing water sources",
                "Plan for potential dry spells",
                "Keep emergency water plans ready",
            ],
        )
    };

    let vegetation_health = if site.ndvi < 0.3 {
        "Poor"
    } else if site.ndvi < 0.5 {
        "Moderate"
    } else {
        "Good"
    };
    let soil_moisture = if site.ndwi < 0.0 {
        "Low"
    } else if site.ndwi < 0.2 {
        "Moderate"
    } else {
        "Good"
    };

    DroughtRiskResponse {
        success: true,
        location,
        risk_level: level.to_string(),
        risk_score: round_to(score, 1),
        alert_color: color.to_string(),
        vulnerability_factors: VulnerabilityFactors {
            groundwater: site.gwp_class,
            vegetation_health: vegetation_health.to_string(),
            soil_moisture: soil_moisture.to_string(),
        },
        recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
        estimated_days_to_crisis: 180 - (score * 1.5) as i32,
        analysis: format!(
            "Drought risk is {} with a risk score of {:.1}/100. {}",
            level.to_lowercase(),
            score,
            recommendations[0]
        ),
    }
}

// ============================================================================
// Rainfall impact
// ============================================================================

/// Highest reachable continuous GWP value.
const MAX_GWP_VALUE: f64 = 2.5;

pub fn rainfall_impact(
    location: Coordinate,
    site: &SiteFeatures,
    rainfall_mm: f64,
) -> RainfallImpactResponse {
    let mut rate = 0.15;
    if site.ndvi > 0.5 {
        rate *= 1.3;
    }
    if site.dem < 620.0 {
        rate *= 1.2;
    }

    let recharge_mm = rainfall_mm * rate;
    let improvement = recharge_mm / 200.0;
    let current_value = site.gwp_value();
    let new_value = (current_value + improvement).min(MAX_GWP_VALUE);
    let new_class = GwpClass::from_value_score(new_value);

    let recharge_time_days = if improvement > 0.0 {
        (30.0 * (improvement / 0.5)) as i64
    } else {
        0
    };
    let deficit = if new_class != GwpClass::High {
        (1.5 - new_value) * 200.0
    } else {
        0.0
    };

    RainfallImpactResponse {
        success: true,
        location,
        current_status: GwpState {
            gwp_class: site.gwp_class,
            gwp_value: round_to(current_value, 2),
        },
        after_rainfall: GwpProjection {
            gwp_class: new_class,
            gwp_value: round_to(new_value, 2),
            improvement: round_to(improvement, 2),
        },
        rainfall_input_mm: rainfall_mm,
        recharge_mm: round_to(recharge_mm, 1),
        recharge_rate_percent: round_to(rate * 100.0, 1),
        recharge_time_days,
        rainfall_deficit_mm: if deficit > 0.0 { round_to(deficit, 1) } else { 0.0 },
        analysis: format!(
            "After {:?}mm rainfall, groundwater status will improve from {} to {}. \
             Approximately {:.1}mm will recharge the aquifer.",
            rainfall_mm, site.gwp_class, new_class, recharge_mm
        ),
    }
}
