//! Request bodies accepted by the API.
//!
//! The frontend posts raw form values, so numeric fields arrive either as JSON
//! numbers or as numeric strings. Fields are kept as [`Numeric`] until a handler
//! asks for them, which lets a missing or malformed field surface as a regular
//! `{"error": ...}` response instead of a body rejection.

use gwp_common::{Coordinate, GwpError, GwpResult};
use serde::{Deserialize, Serialize};

/// A number sent either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Interpret as a finite `f64`.
    pub fn to_f64(&self, field: &str) -> GwpResult<f64> {
        let value = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| GwpError::invalid(field, format!("could not convert '{}' to a number", s)))?,
        };

        if !value.is_finite() {
            return Err(GwpError::invalid(field, "must be a finite number"));
        }
        Ok(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Number(value)
    }
}

/// Read a required numeric field.
pub fn required(value: &Option<Numeric>, field: &str) -> GwpResult<f64> {
    value
        .as_ref()
        .ok_or_else(|| GwpError::MissingField(field.to_string()))?
        .to_f64(field)
}

/// Read an optional numeric field, falling back to `default` when absent.
pub fn optional_or(value: &Option<Numeric>, field: &str, default: f64) -> GwpResult<f64> {
    match value {
        Some(v) => v.to_f64(field),
        None => Ok(default),
    }
}

/// Longest history served by the month-based analyses (ten years).
pub const MAX_MONTHS: u32 = 120;

/// Deepest borewell accepted, in metres.
pub const MAX_DEPTH_M: i64 = 2000;

fn coordinate(lat: &Option<Numeric>, lon: &Option<Numeric>) -> GwpResult<Coordinate> {
    Ok(Coordinate::new(required(lat, "lat")?, required(lon, "lon")?))
}

/// Body carrying just a coordinate.
///
/// Used by every single-location endpoint that takes no further inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointRequest {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
}

impl PointRequest {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat.into()),
            lon: Some(lon.into()),
        }
    }

    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }
}

/// Body for `/api/borewell-predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BorewellPredictRequest {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
    /// Planned depth in metres.
    #[serde(default)]
    pub depth: Option<Numeric>,
    #[serde(default)]
    pub season: Option<String>,
}

impl BorewellPredictRequest {
    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }

    pub fn depth(&self) -> GwpResult<i64> {
        let depth = optional_or(&self.depth, "depth", 100.0)?.trunc();
        if depth < 1.0 || depth > MAX_DEPTH_M as f64 {
            return Err(GwpError::invalid(
                "depth",
                format!("must be between 1 and {} metres", MAX_DEPTH_M),
            ));
        }
        Ok(depth as i64)
    }

    pub fn season(&self) -> &str {
        self.season.as_deref().unwrap_or("post-monsoon")
    }
}

/// One coordinate inside a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinateInput {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
}

impl CoordinateInput {
    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }
}

/// Body for `/api/batch-predict`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub coordinates: Vec<CoordinateInput>,
}

/// Body for `/api/area-analysis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaRequest {
    #[serde(default)]
    pub center_lat: Option<Numeric>,
    #[serde(default)]
    pub center_lon: Option<Numeric>,
    #[serde(default)]
    pub radius_km: Option<Numeric>,
}

impl AreaRequest {
    pub fn center(&self) -> GwpResult<Coordinate> {
        Ok(Coordinate::new(
            required(&self.center_lat, "center_lat")?,
            required(&self.center_lon, "center_lon")?,
        ))
    }

    pub fn radius_km(&self) -> GwpResult<f64> {
        positive(optional_or(&self.radius_km, "radius_km", 2.0)?, "radius_km")
    }
}

/// A named location in a comparison request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NamedLocation {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NamedLocation {
    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }

    /// Provided name, or "Location N" (1-based).
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("Location {}", index + 1),
        }
    }
}

/// Body for `/api/comparison`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonRequest {
    #[serde(default)]
    pub locations: Vec<NamedLocation>,
}

/// Body for endpoints that take a coordinate and a month count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthsRequest {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
    #[serde(default)]
    pub months: Option<Numeric>,
}

impl MonthsRequest {
    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }

    pub fn months(&self) -> GwpResult<u32> {
        let months = optional_or(&self.months, "months", 12.0)?.trunc();
        if months < 1.0 || months > MAX_MONTHS as f64 {
            return Err(GwpError::invalid(
                "months",
                format!("must be between 1 and {}", MAX_MONTHS),
            ));
        }
        Ok(months as u32)
    }
}

/// Body for endpoints that take a coordinate and a search radius.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RadiusRequest {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
    #[serde(default)]
    pub radius: Option<Numeric>,
}

impl RadiusRequest {
    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }

    pub fn radius_or(&self, default: f64) -> GwpResult<f64> {
        positive(optional_or(&self.radius, "radius", default)?, "radius")
    }
}

/// Body for `/api/rainfall-impact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RainfallRequest {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
    /// Rainfall amount in millimetres.
    #[serde(default)]
    pub rainfall: Option<Numeric>,
}

impl RainfallRequest {
    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }

    pub fn rainfall_mm(&self) -> GwpResult<f64> {
        let mm = optional_or(&self.rainfall, "rainfall", 100.0)?;
        if mm < 0.0 {
            return Err(GwpError::invalid("rainfall", "must not be negative"));
        }
        Ok(mm)
    }
}

/// Body for `/api/alerts-setup`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertsRequest {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl AlertsRequest {
    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn phone(&self) -> &str {
        self.phone.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Body for `/api/precipitation-forecast`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastRequest {
    #[serde(default)]
    pub lat: Option<Numeric>,
    #[serde(default)]
    pub lon: Option<Numeric>,
    #[serde(default)]
    pub days: Option<Numeric>,
}

impl ForecastRequest {
    pub fn coordinate(&self) -> GwpResult<Coordinate> {
        coordinate(&self.lat, &self.lon)
    }

    pub fn days(&self) -> GwpResult<u32> {
        let days = optional_or(&self.days, "days", 7.0)?.trunc();
        if days < 1.0 {
            return Err(GwpError::invalid("days", "must be at least 1"));
        }
        Ok(days as u32)
    }
}

fn positive(value: f64, field: &str) -> GwpResult<f64> {
    if value <= 0.0 {
        return Err(GwpError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}
