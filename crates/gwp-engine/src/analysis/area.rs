//! Grid sampling over a circular-ish area.

use gwp_common::geo::KM_PER_DEGREE;
use gwp_common::{round_to, Coordinate, GwpClass, GwpError, GwpResult};
use gwp_protocol::analysis::{AreaAnalysis, AreaDistribution, IndexAverages};

use crate::sampler::FeatureSampler;

/// Samples per side of the square grid.
const GRID: usize = 20;

/// Sample a `GRID x GRID` lattice spanning `radius_km` around `center`.
///
/// Points outside the district are skipped. Fails with
/// [`GwpError::NoValidPoints`] when none remain.
pub fn area_analysis(
    sampler: &FeatureSampler,
    center: Coordinate,
    radius_km: f64,
) -> GwpResult<AreaAnalysis> {
    let lat_span = radius_km / KM_PER_DEGREE;
    let lon_span = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos());
    let lat_step = lat_span / (GRID / 2) as f64;
    let lon_step = lon_span / (GRID / 2) as f64;

    let mut counts = [0usize; 3];
    let (mut ndvi, mut ndwi, mut dem) = (0.0, 0.0, 0.0);
    let mut total = 0usize;

    for i in 0..GRID {
        for j in 0..GRID {
            let point = Coordinate::new(
                center.lat - lat_span + i as f64 * lat_step,
                center.lon - lon_span + j as f64 * lon_step,
            );
            if !sampler.contains(point) {
                continue;
            }

            let site = sampler.sample(point);
            counts[site.gwp_class.value() as usize] += 1;
            ndvi += site.ndvi;
            ndwi += site.ndwi;
            dem += site.dem;
            total += 1;
        }
    }

    if total == 0 {
        return Err(GwpError::NoValidPoints);
    }

    let n = total as f64;
    let high = counts[GwpClass::High.value() as usize];
    let high_percentage = high as f64 / n * 100.0;

    let (rating, recommendation) = if high_percentage > 60.0 {
        (5, "EXCELLENT area for groundwater extraction")
    } else if high_percentage > 40.0 {
        (4, "GOOD area with decent groundwater potential")
    } else if high_percentage > 20.0 {
        (3, "MODERATE area, select specific high-potential spots")
    } else {
        (2, "POOR area, consider alternative locations")
    };

    Ok(AreaAnalysis {
        total_samples: total,
        distribution: AreaDistribution {
            high,
            moderate: counts[GwpClass::Moderate.value() as usize],
            low: counts[GwpClass::Low.value() as usize],
            high_percentage: round_to(high_percentage, 1),
        },
        averages: IndexAverages {
            ndvi: round_to(ndvi / n, 3),
            ndwi: round_to(ndwi / n, 3),
            elevation: round_to(dem / n, 1),
        },
        rating,
        recommendation: recommendation.to_string(),
    })
}
