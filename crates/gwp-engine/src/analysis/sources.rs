//! Surface water bodies near a query point.

use gwp_common::{haversine_km, round_to, Coordinate};
use gwp_protocol::analysis::{NearbySourcesResponse, SourceHit};
use gwp_protocol::{WaterSourceKind, WaterSourcesConfig};

fn feasibility(distance_km: f64) -> &'static str {
    if distance_km < 2.0 {
        "High"
    } else if distance_km < 4.0 {
        "Medium"
    } else {
        "Low"
    }
}

/// Configured water bodies within `radius_km`, nearest first.
pub fn nearby_sources(
    location: Coordinate,
    radius_km: f64,
    catalogue: &WaterSourcesConfig,
) -> NearbySourcesResponse {
    let mut hits: Vec<SourceHit> = catalogue
        .sources
        .iter()
        .filter_map(|source| {
            let distance = haversine_km(location, source.coordinate());
            (distance <= radius_km).then(|| SourceHit {
                source: source.clone(),
                distance_km: round_to(distance, 2),
                feasibility: feasibility(distance).to_string(),
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut recommendations = Vec::new();
    if let Some(nearest) = hits.first() {
        if nearest.distance_km < 2.0 {
            recommendations.push(format!(
                "Very close to {} ({} km) - Consider surface water for irrigation",
                nearest.source.name, nearest.distance_km
            ));
        }
        if nearest.source.kind.is_impoundment() {
            recommendations.push("Lake/reservoir nearby - Potential for aquifer recharge".to_string());
        }
    }
    if hits
        .iter()
        .any(|h| h.source.kind == WaterSourceKind::River && h.source.perennial == Some(true))
    {
        recommendations.push("Perennial river nearby - Groundwater recharge zone likely".to_string());
    }
    if recommendations.is_empty() {
        recommendations.push("No major water sources within search radius".to_string());
    }

    let recharge_potential = if hits.iter().any(|h| h.distance_km < 3.0) {
        "High"
    } else {
        "Moderate"
    };

    NearbySourcesResponse {
        location,
        search_radius_km: radius_km,
        total_sources_found: hits.len(),
        nearest_source: hits.first().cloned(),
        water_sources: hits,
        recommendations,
        recharge_potential: recharge_potential.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gwp_protocol::WaterSource;

    fn catalogue() -> WaterSourcesConfig {
        WaterSourcesConfig {
            sources: vec![
                WaterSource {
                    name: "Far River".into(),
                    lat: 15.48,
                    lon: 75.0,
                    kind: WaterSourceKind::River,
                    perennial: Some(true),
                    capacity_mcm: None,
                },
                WaterSource {
                    name: "Near Lake".into(),
                    lat: 15.455,
                    lon: 75.0,
                    kind: WaterSourceKind::Lake,
                    perennial: None,
                    capacity_mcm: Some(1.0),
                },
                WaterSource {
                    name: "Out of range".into(),
                    lat: 15.9,
                    lon: 75.4,
                    kind: WaterSourceKind::Tank,
                    perennial: None,
                    capacity_mcm: None,
                },
            ],
        }
    }

    #[test]
    fn test_sorted_by_distance_within_radius() {
        let resp = nearby_sources(Coordinate::new(15.45, 75.0), 5.0, &catalogue());
        assert_eq!(resp.total_sources_found, 2);
        assert_eq!(resp.water_sources[0].source.name, "Near Lake");
        assert_eq!(resp.water_sources[0].feasibility, "High");
        assert_eq!(resp.water_sources[1].feasibility, "Medium");
        assert_eq!(resp.nearest_source.unwrap().source.name, "Near Lake");
        assert_eq!(resp.recharge_potential, "High");

        assert_eq!(resp.recommendations.len(), 3);
        assert!(resp.recommendations[0].starts_with("Very close to Near Lake (0.56 km)"));
        assert_eq!(resp.recommendations[1], "Lake/reservoir nearby - Potential for aquifer recharge");
    }

    #[test]
    fn test_nothing_in_range() {
        let resp = nearby_sources(Coordinate::new(15.1, 74.6), 1.0, &catalogue());
        assert_eq!(resp.total_sources_found, 0);
        assert!(resp.nearest_source.is_none());
        assert_eq!(
            resp.recommendations,
            vec!["No major water sources within search radius"]
        );
        assert_eq!(resp.recharge_potential, "Moderate");
    }
}
