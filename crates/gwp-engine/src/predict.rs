//! Point, batch and comparison predictions plus district statistics.

use gwp_common::{round_to, Coordinate, GwpClass};
use gwp_protocol::prediction::{SiteMetrics, SiteScores};
use gwp_protocol::responses::ClassDistribution;
use gwp_protocol::{
    BatchItem, BatchPrediction, ComparisonEntry, ComparisonItem, ItemError, Prediction,
    StatisticsResponse,
};
use tracing::debug;

use crate::explain;
use crate::sampler::{FeatureSampler, SiteFeatures};

/// District area in square kilometres.
pub const DISTRICT_AREA_KM2: f64 = 4263.52;

pub fn prediction(site: &SiteFeatures, confidence: f64) -> Prediction {
    Prediction {
        groundwater_class: site.gwp_class,
        confidence,
        ndvi: round_to(site.ndvi, 3),
        ndwi: round_to(site.ndwi, 3),
        elevation: round_to(site.dem, 1),
    }
}

/// Predict every coordinate; points outside the district become item errors.
pub fn batch_predict(sampler: &FeatureSampler, coords: &[Coordinate]) -> Vec<BatchItem> {
    coords
        .iter()
        .map(|&location| {
            if !sampler.contains(location) {
                return BatchItem::Failed(ItemError {
                    name: None,
                    location,
                    error: sampler.outside_message(),
                });
            }

            let site = sampler.sample(location);
            let p = prediction(&site, sampler.confidence());
            BatchItem::Predicted(BatchPrediction {
                location,
                gwp_class: p.groundwater_class,
                confidence: p.confidence,
                ndvi: p.ndvi,
                ndwi: p.ndwi,
                elevation: p.elevation,
            })
        })
        .collect()
}

/// Component scores on a 0-100 scale.
pub fn site_scores(site: &SiteFeatures) -> SiteScores {
    let gwp = site.gwp_class.pick(100.0, 60.0, 20.0);
    let vegetation = (site.ndvi * 150.0).min(100.0);
    let water_content = ((site.ndwi + 0.2) * 150.0).min(100.0);
    let elevation = ((750.0 - site.dem) / 2.0).max(0.0);
    let overall = gwp * 0.4 + vegetation * 0.2 + water_content * 0.2 + elevation * 0.2;

    SiteScores {
        overall: round_to(overall, 1),
        gwp: round_to(gwp, 1),
        vegetation: round_to(vegetation, 1),
        water_content: round_to(water_content, 1),
        elevation: round_to(elevation, 1),
    }
}

/// Score named locations and order them best first.
///
/// Returns the sorted list and the best entry. Failed entries sort as zero
/// and are never ranked.
pub fn compare_locations(
    sampler: &FeatureSampler,
    locations: &[(String, Coordinate)],
) -> (Vec<ComparisonItem>, Option<ComparisonEntry>) {
    let mut items: Vec<ComparisonItem> = locations
        .iter()
        .map(|(name, location)| {
            if !sampler.contains(*location) {
                return ComparisonItem::Failed(ItemError {
                    name: Some(name.clone()),
                    location: *location,
                    error: sampler.outside_message(),
                });
            }

            let site = sampler.sample(*location);
            ComparisonItem::Scored(ComparisonEntry {
                name: name.clone(),
                location: *location,
                gwp_class: site.gwp_class,
                metrics: SiteMetrics {
                    ndvi: round_to(site.ndvi, 3),
                    ndwi: round_to(site.ndwi, 3),
                    elevation: round_to(site.dem, 1),
                },
                scores: site_scores(&site),
                conclusion: explain::conclusion(site.gwp_class).to_string(),
                rank: None,
            })
        })
        .collect();

    items.sort_by(|a, b| {
        b.overall_score()
            .partial_cmp(&a.overall_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (idx, item) in items.iter_mut().enumerate() {
        if let ComparisonItem::Scored(entry) = item {
            entry.rank = Some(idx + 1);
        }
    }

    let best = match items.first() {
        Some(ComparisonItem::Scored(entry)) => Some(entry.clone()),
        _ => None,
    };
    debug!(compared = items.len(), has_best = best.is_some(), "Comparison complete");

    (items, best)
}

/// District-wide class distribution and index averages.
pub fn district_statistics(sampler: &FeatureSampler) -> StatisticsResponse {
    let (gwp_distribution, data_source) = match sampler.raster() {
        Some(raster) => {
            let shares = raster.class_shares();
            (
                ClassDistribution {
                    low: round_to(shares.low, 1),
                    moderate: round_to(shares.moderate, 1),
                    high: round_to(shares.high, 1),
                },
                Some("Actual GWP map".to_string()),
            )
        }
        None => (
            ClassDistribution {
                low: 25.0,
                moderate: 41.7,
                high: 33.3,
            },
            None,
        ),
    };

    StatisticsResponse {
        total_area: DISTRICT_AREA_KM2,
        gwp_distribution,
        average_ndvi: 0.486,
        average_ndwi: 0.142,
        average_elevation: 678.5,
        data_source,
    }
}

/// Count of each class among predicted batch items.
pub fn class_counts(items: &[BatchItem]) -> [(GwpClass, usize); 3] {
    let mut counts = [
        (GwpClass::High, 0),
        (GwpClass::Moderate, 0),
        (GwpClass::Low, 0),
    ];
    for item in items {
        if let BatchItem::Predicted(p) = item {
            for entry in counts.iter_mut() {
                if entry.0 == p.gwp_class {
                    entry.1 += 1;
                }
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::GwpRaster;
    use crate::sampler::MAP_DATA_SOURCE;
    use gwp_common::BoundingBox;
    use image::{Rgba, RgbaImage};

    fn sampler() -> FeatureSampler {
        FeatureSampler::simulated("Dharwad", BoundingBox::DHARWAD)
    }

    #[test]
    fn test_batch_marks_outside_points() {
        let coords = [
            Coordinate::new(15.45, 75.01),
            Coordinate::new(12.97, 77.59),
        ];
        let items = batch_predict(&sampler(), &coords);
        assert_eq!(items.len(), 2);
        assert!(!items[0].is_error());
        match &items[1] {
            BatchItem::Failed(e) => assert_eq!(e.error, "Outside Dharwad district"),
            other => panic!("expected failure, got {:?}", other),
        }
        let total: usize = class_counts(&items).iter().map(|(_, n)| n).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_site_scores() {
        let site = SiteFeatures {
            ndvi: 0.5,
            ndwi: 0.2,
            dem: 620.0,
            gwp_class: GwpClass::High,
            data_source: MAP_DATA_SOURCE,
        };
        let scores = site_scores(&site);
        assert_eq!(scores.gwp, 100.0);
        assert_eq!(scores.vegetation, 75.0);
        assert_eq!(scores.water_content, 60.0);
        assert_eq!(scores.elevation, 65.0);
        // 40 + 15 + 12 + 13
        assert_eq!(scores.overall, 80.0);
    }

    #[test]
    fn test_comparison_sorted_and_ranked() {
        let locations = vec![
            ("Outside".to_string(), Coordinate::new(12.0, 77.0)),
            ("A".to_string(), Coordinate::new(15.45, 75.01)),
            ("B".to_string(), Coordinate::new(15.30, 74.80)),
        ];
        let (items, best) = compare_locations(&sampler(), &locations);

        assert!(items[0].overall_score() >= items[1].overall_score());
        assert!(matches!(items[2], ComparisonItem::Failed(_)));
        match &items[0] {
            ComparisonItem::Scored(entry) => assert_eq!(entry.rank, Some(1)),
            other => panic!("expected scored entry, got {:?}", other),
        }
        assert_eq!(best.unwrap().rank, Some(1));
    }

    #[test]
    fn test_comparison_best_is_none_when_all_fail() {
        let locations = vec![("X".to_string(), Coordinate::new(12.0, 77.0))];
        let (_, best) = compare_locations(&sampler(), &locations);
        assert!(best.is_none());
    }

    #[test]
    fn test_statistics_fallback_and_map() {
        let stats = district_statistics(&sampler());
        assert_eq!(stats.gwp_distribution.moderate, 41.7);
        assert!(stats.data_source.is_none());

        let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let raster = GwpRaster::from_image(img, BoundingBox::DHARWAD).unwrap();
        let mapped = FeatureSampler::new("Dharwad", BoundingBox::DHARWAD, Some(raster));
        let stats = district_statistics(&mapped);
        assert_eq!(stats.gwp_distribution.low, 100.0);
        assert_eq!(stats.data_source.as_deref(), Some("Actual GWP map"));
    }
}
