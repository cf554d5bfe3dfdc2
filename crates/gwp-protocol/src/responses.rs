//! Error, statistics and map metadata responses.

use gwp_common::BoundingBox;
use serde::{Deserialize, Serialize};

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,

    /// District limits, attached when a coordinate fell outside them.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bounds: Option<DistrictBounds>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bbox: &BoundingBox) -> Self {
        self.bounds = Some(DistrictBounds::from(bbox));
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DistrictBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl From<&BoundingBox> for DistrictBounds {
    fn from(bbox: &BoundingBox) -> Self {
        Self {
            lat_min: bbox.min_y,
            lat_max: bbox.max_y,
            lon_min: bbox.min_x,
            lon_max: bbox.max_x,
        }
    }
}

/// Response of `/api/map-bounds`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapBoundsResponse {
    /// `[[lat_min, lon_min], [lat_max, lon_max]]`
    pub bounds: [[f64; 2]; 2],
    /// `[lat, lon]`
    pub center: [f64; 2],
}

impl From<&BoundingBox> for MapBoundsResponse {
    fn from(bbox: &BoundingBox) -> Self {
        Self {
            bounds: bbox.to_leaflet_bounds(),
            center: bbox.center(),
        }
    }
}

/// Response of `/api/statistics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatisticsResponse {
    /// District area in square kilometres.
    pub total_area: f64,
    pub gwp_distribution: ClassDistribution,
    pub average_ndvi: f64,
    pub average_ndwi: f64,
    pub average_elevation: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_source: Option<String>,
}

/// Percentage of area per class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClassDistribution {
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Moderate")]
    pub moderate: f64,
    #[serde(rename = "High")]
    pub high: f64,
}

/// Response of `/api/system-status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemStatusResponse {
    pub actual_data_loaded: bool,
    pub gwp_image_path: String,
    pub gwp_image_exists: bool,
    /// Directory holding the overlay.
    pub data_dir: String,
    pub message: String,
    pub fix: String,
}

/// Response of `/health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

/// Response of `/ready`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadyResponse {
    pub ready: bool,
    pub raster: String,
    pub weather: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_with_bounds() {
        let err = ErrorResponse::new("Coordinates are outside Dharwad district")
            .with_bounds(&BoundingBox::DHARWAD);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["bounds"]["lat_min"], 15.0);
        assert_eq!(json["bounds"]["lon_max"], 75.5);
    }

    #[test]
    fn test_plain_error_has_no_bounds() {
        let json = serde_json::to_string(&ErrorResponse::new("boom")).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }

    #[test]
    fn test_map_bounds() {
        let resp = MapBoundsResponse::from(&BoundingBox::DHARWAD);
        assert_eq!(resp.center, [15.5, 75.0]);
    }
}
