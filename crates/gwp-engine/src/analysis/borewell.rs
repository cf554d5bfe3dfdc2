//! Borewell success prediction and drill-site search.

use gwp_common::{round_to, Coordinate, GwpClass};
use gwp_protocol::analysis::{BorewellOutcome, DrillSite};
use rand::Rng;

use crate::sampler::{FeatureSampler, SiteFeatures};

/// Cost per foot of drilling, in rupees.
pub const DRILLING_COST_PER_FT: u32 = 250;

/// Scan steps per axis for drill-site search.
const SCAN_STEPS: i32 = 10;

/// Degrees of latitude per kilometre used by the scan.
const DEG_PER_KM: f64 = 0.009;

const MAX_RECOMMENDATIONS: usize = 5;

pub fn season_bonus(season: &str) -> f64 {
    match season {
        "monsoon" => 0.1,
        "post-monsoon" => 0.05,
        "summer" => -0.1,
        _ => 0.0,
    }
}

/// Success probability and advice for drilling at a site.
pub fn borewell_predict(
    site: &SiteFeatures,
    planned_depth: i64,
    season: &str,
) -> (BorewellOutcome, Vec<String>) {
    let base = site.gwp_class.pick(0.85, 0.60, 0.30);
    let depth_bonus = if planned_depth > 150 {
        0.1
    } else if planned_depth > 100 {
        0.05
    } else {
        0.0
    };
    let success = (base + depth_bonus + season_bonus(season)).min(0.95);

    let mut recommendations = Vec::new();
    if success < 0.5 {
        recommendations.push("Consider moving to a nearby 'High' potential zone".to_string());
        recommendations.push(format!(
            "Increase depth to {}m for better results",
            planned_depth.saturating_add(50)
        ));
    }
    if season == "summer" {
        recommendations.push("Wait for monsoon season for better yield".to_string());
    }
    if site.gwp_class == GwpClass::High {
        recommendations.push("Excellent location! Proceed with confidence".to_string());
    }

    let expected_yield = if success > 0.7 {
        "Good"
    } else if success > 0.5 {
        "Moderate"
    } else {
        "Low"
    };

    (
        BorewellOutcome {
            groundwater_class: site.gwp_class,
            success_probability: round_to(success, 2),
            expected_yield: expected_yield.to_string(),
        },
        recommendations,
    )
}

fn drilling_score(site: &SiteFeatures) -> f64 {
    site.gwp_class.pick(40.0, 20.0, 0.0) + site.ndvi * 20.0 + site.ndwi * 30.0
        + (750.0 - site.dem) / 10.0
}

/// Estimated depth (ft) and success chance (%) for a class.
fn depth_and_success<R: Rng + ?Sized>(class: GwpClass, rng: &mut R) -> (u32, u32) {
    match class {
        GwpClass::High => (80 + rng.gen_range(0..40), 85 + rng.gen_range(0..10)),
        GwpClass::Moderate => (120 + rng.gen_range(0..60), 60 + rng.gen_range(0..20)),
        GwpClass::Low => (180 + rng.gen_range(0..80), 30 + rng.gen_range(0..25)),
    }
}

/// Scan a grid around `center` and return the best drill sites, best first,
/// together with the number of in-district points examined.
pub fn borewell_recommendation<R: Rng + ?Sized>(
    sampler: &FeatureSampler,
    center: Coordinate,
    radius_km: f64,
    rng: &mut R,
) -> (Vec<DrillSite>, usize) {
    let mut sites = Vec::new();

    for i in 0..SCAN_STEPS {
        for j in 0..SCAN_STEPS {
            let lat_offset = (i - SCAN_STEPS / 2) as f64 / SCAN_STEPS as f64 * radius_km * DEG_PER_KM;
            let lon_offset = (j - SCAN_STEPS / 2) as f64 / SCAN_STEPS as f64 * radius_km * DEG_PER_KM;
            let point = Coordinate::new(center.lat + lat_offset, center.lon + lon_offset);
            if !sampler.contains(point) {
                continue;
            }

            let site = sampler.sample(point);
            let (estimated_depth_ft, success_probability) = depth_and_success(site.gwp_class, rng);

            sites.push(DrillSite {
                lat: round_to(point.lat, 6),
                lon: round_to(point.lon, 6),
                score: round_to(drilling_score(&site), 2),
                gwp_class: site.gwp_class,
                estimated_depth_ft,
                success_probability,
                estimated_cost: estimated_depth_ft * DRILLING_COST_PER_FT,
            });
        }
    }

    let scanned = sites.len();
    sites.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sites.truncate(MAX_RECOMMENDATIONS);

    (sites, scanned)
}

pub fn recommendation_summary(sites: &[DrillSite]) -> String {
    match sites.first() {
        Some(best) => format!(
            "Found {} promising locations. Best spot has {}% success probability at estimated depth of {} feet.",
            sites.len(),
            best.success_probability,
            best.estimated_depth_ft
        ),
        None => "No suitable drilling locations found within the search radius.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::MAP_DATA_SOURCE;
    use gwp_common::BoundingBox;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn site(class: GwpClass) -> SiteFeatures {
        let (ndvi, ndwi, dem) = class.pick((0.5, 0.2, 620.0), (0.4, 0.1, 660.0), (0.2, -0.05, 700.0));
        SiteFeatures {
            ndvi,
            ndwi,
            dem,
            gwp_class: class,
            data_source: MAP_DATA_SOURCE,
        }
    }

    #[test]
    fn test_success_probability_is_capped() {
        let (outcome, recs) = borewell_predict(&site(GwpClass::High), 200, "monsoon");
        assert_eq!(outcome.success_probability, 0.95);
        assert_eq!(outcome.expected_yield, "Good");
        assert_eq!(recs, vec!["Excellent location! Proceed with confidence"]);
    }

    #[test]
    fn test_low_site_in_summer() {
        let (outcome, recs) = borewell_predict(&site(GwpClass::Low), 100, "summer");
        assert_eq!(outcome.success_probability, 0.2);
        assert_eq!(outcome.expected_yield, "Low");
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[1], "Increase depth to 150m for better results");
        assert_eq!(recs[2], "Wait for monsoon season for better yield");
    }

    #[test]
    fn test_extreme_depth_does_not_overflow() {
        let (_, recs) = borewell_predict(&site(GwpClass::Low), i64::MAX, "post-monsoon");
        assert_eq!(recs[1], format!("Increase depth to {}m for better results", i64::MAX));
    }

    #[test]
    fn test_moderate_post_monsoon() {
        let (outcome, _) = borewell_predict(&site(GwpClass::Moderate), 100, "post-monsoon");
        assert_eq!(outcome.success_probability, 0.65);
        assert_eq!(outcome.expected_yield, "Moderate");
    }

    #[test]
    fn test_recommendation_returns_top_five_sorted() {
        let sampler = FeatureSampler::simulated("Dharwad", BoundingBox::DHARWAD);
        let mut rng = StdRng::seed_from_u64(7);
        let (sites, scanned) =
            borewell_recommendation(&sampler, Coordinate::new(15.45, 75.0), 0.5, &mut rng);

        assert_eq!(scanned, 100);
        assert_eq!(sites.len(), 5);
        assert!(sites.windows(2).all(|w| w[0].score >= w[1].score));
        for s in &sites {
            assert_eq!(s.estimated_cost, s.estimated_depth_ft * DRILLING_COST_PER_FT);
        }
        assert!(recommendation_summary(&sites).starts_with("Found 5 promising locations."));
    }
}
