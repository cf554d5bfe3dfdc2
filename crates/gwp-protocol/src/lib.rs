//! Groundwater Potential (GWP) API protocol.
//!
//! This crate holds the JSON contracts of the prediction service: the request
//! bodies posted by the web frontend and every response shape it renders.
//!
//! # Example
//!
//! ```rust
//! use gwp_protocol::requests::PointRequest;
//!
//! let req: PointRequest = serde_json::from_str(r#"{"lat": "15.45", "lon": 75.01}"#).unwrap();
//! let point = req.coordinate().unwrap();
//! assert_eq!(point.lat, 15.45);
//! ```

pub mod analysis;
pub mod prediction;
pub mod requests;
pub mod responses;
pub mod sources;
pub mod xai;

pub use prediction::{
    BatchItem, BatchPrediction, BatchResult, ComparisonEntry, ComparisonItem, ComparisonResult,
    CurrentWeather, Explanation, ItemError, Prediction, PredictionResult,
};
pub use requests::Numeric;
pub use responses::{DistrictBounds, ErrorResponse, MapBoundsResponse, StatisticsResponse};
pub use sources::{WaterSource, WaterSourceKind, WaterSourcesConfig};
pub use xai::{FeatureDetail, FeatureImportance, XaiExplanation};

/// Media types used in API responses
pub mod media_types {
    /// JSON media type
    pub const JSON: &str = "application/json";
    /// PNG media type for the overlay raster
    pub const PNG: &str = "image/png";
    /// Prometheus text exposition format
    pub const PROMETHEUS: &str = "text/plain; version=0.0.4";
}
