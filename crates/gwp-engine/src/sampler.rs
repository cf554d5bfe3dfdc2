//! Per-site feature extraction.
//!
//! With an overlay loaded the class comes straight from the map and the
//! spectral indices are class baselines with a small location-seeded jitter.
//! Without one every value is simulated from the same seed, so repeated
//! queries for a coordinate always agree.

use gwp_common::{location_seed, round_to, BoundingBox, Coordinate, GwpClass, GwpError, GwpResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::raster::GwpRaster;

pub const MAP_DATA_SOURCE: &str = "Actual GWP map + derived parameters";
pub const SIMULATED_DATA_SOURCE: &str = "Simulated data";

const MAP_CONFIDENCE: f64 = 0.92;
const SIMULATED_CONFIDENCE: f64 = 0.85;

/// Indices and class observed at one coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteFeatures {
    pub ndvi: f64,
    pub ndwi: f64,
    /// Elevation in metres.
    pub dem: f64,
    pub gwp_class: GwpClass,
    pub data_source: &'static str,
}

impl SiteFeatures {
    /// Ordinal class value as a float (0, 1 or 2).
    pub fn gwp_value(&self) -> f64 {
        self.gwp_class.value() as f64
    }
}

/// Class baselines `(ndvi, ndwi, dem)` used around map-derived classes.
fn class_baseline(class: GwpClass) -> (f64, f64, f64) {
    class.pick((0.5, 0.2, 620.0), (0.4, 0.1, 660.0), (0.2, -0.05, 700.0))
}

/// Samples site features for coordinates inside one district.
#[derive(Debug, Clone)]
pub struct FeatureSampler {
    district: String,
    bounds: BoundingBox,
    raster: Option<GwpRaster>,
}

impl FeatureSampler {
    pub fn new(district: impl Into<String>, bounds: BoundingBox, raster: Option<GwpRaster>) -> Self {
        Self {
            district: district.into(),
            bounds,
            raster,
        }
    }

    /// Sampler without an overlay.
    pub fn simulated(district: impl Into<String>, bounds: BoundingBox) -> Self {
        Self::new(district, bounds, None)
    }

    pub fn district(&self) -> &str {
        &self.district
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn raster(&self) -> Option<&GwpRaster> {
        self.raster.as_ref()
    }

    pub fn is_map_backed(&self) -> bool {
        self.raster.is_some()
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.bounds.contains_lat_lon(coord.lat, coord.lon)
    }

    /// Reject coordinates outside the district.
    pub fn require_inside(&self, coord: Coordinate) -> GwpResult<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GwpError::OutsideDistrict(self.district.clone()))
        }
    }

    /// Per-item message used inside batch responses.
    pub fn outside_message(&self) -> String {
        format!("Outside {} district", self.district)
    }

    pub fn confidence(&self) -> f64 {
        if self.is_map_backed() {
            MAP_CONFIDENCE
        } else {
            SIMULATED_CONFIDENCE
        }
    }

    /// Class at a coordinate without deriving the indices.
    pub fn class_at(&self, coord: Coordinate) -> GwpClass {
        match &self.raster {
            Some(raster) => raster.class_at(coord.lat, coord.lon),
            None => self.sample(coord).gwp_class,
        }
    }

    pub fn sample(&self, coord: Coordinate) -> SiteFeatures {
        let mut rng = StdRng::seed_from_u64(location_seed(coord.lat, coord.lon));

        match &self.raster {
            Some(raster) => {
                let gwp_class = raster.class_at(coord.lat, coord.lon);
                let (ndvi, ndwi, dem) = class_baseline(gwp_class);

                let ndvi = ndvi + (rng.gen::<f64>() - 0.5) * 0.1;
                let ndwi = ndwi + (rng.gen::<f64>() - 0.5) * 0.1;
                let dem = dem + (rng.gen::<f64>() - 0.5) * 30.0;

                SiteFeatures {
                    ndvi: round_to(ndvi, 3),
                    ndwi: round_to(ndwi, 3),
                    dem: round_to(dem, 1),
                    gwp_class,
                    data_source: MAP_DATA_SOURCE,
                }
            }
            None => {
                let ndvi = 0.3 + rng.gen::<f64>() * 0.4;
                let ndwi = -0.1 + rng.gen::<f64>() * 0.4;
                let dem = 600.0 + rng.gen::<f64>() * 100.0;

                let score = ndvi * 0.3 + ndwi * 0.4 + (750.0 - dem) / 200.0 * 0.3;
                let gwp_class = if score > 0.6 {
                    GwpClass::High
                } else if score > 0.4 {
                    GwpClass::Moderate
                } else {
                    GwpClass::Low
                };

                SiteFeatures {
                    ndvi: round_to(ndvi, 3),
                    ndwi: round_to(ndwi, 3),
                    dem: round_to(dem, 1),
                    gwp_class,
                    data_source: SIMULATED_DATA_SOURCE,
                }
            }
        }
    }
}
