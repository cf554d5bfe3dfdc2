//! Prediction, batch and comparison responses.

use gwp_common::{Coordinate, GwpClass};
use serde::{Deserialize, Serialize};

use crate::xai::XaiExplanation;

/// Response of `/api/predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub success: bool,
    pub location: Coordinate,
    pub prediction: Prediction,
    /// Current weather, `null` when the weather service could not be reached.
    pub weather: Option<CurrentWeather>,
    pub explanation: Explanation,
    pub xai: XaiExplanation,
    pub timestamp: String,
    pub data_source: String,
}

/// Class, confidence and the indices the class was derived from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub groundwater_class: GwpClass,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub ndvi: f64,
    pub ndwi: f64,
    /// Elevation in metres.
    pub elevation: f64,
}

/// Current conditions at the queried point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall_today: f64,
    pub description: String,
}

/// Plain-language factor list and verdict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Explanation {
    pub factors: Vec<String>,
    pub conclusion: String,
}

/// Response of `/api/batch-predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchResult {
    pub success: bool,
    pub total_locations: usize,
    pub results: Vec<BatchItem>,
    pub timestamp: String,
}

/// One batch entry: a prediction or the reason there is none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum BatchItem {
    Predicted(BatchPrediction),
    Failed(ItemError),
}

impl BatchItem {
    pub fn is_error(&self) -> bool {
        matches!(self, BatchItem::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchPrediction {
    pub location: Coordinate,
    pub gwp_class: GwpClass,
    pub confidence: f64,
    pub ndvi: f64,
    pub ndwi: f64,
    pub elevation: f64,
}

/// Per-item failure carried inside a batch or comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemError {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    pub location: Coordinate,
    pub error: String,
}

/// Response of `/api/comparison`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonResult {
    pub success: bool,
    pub total_compared: usize,
    pub comparisons: Vec<ComparisonItem>,
    /// Top-ranked entry, `null` when the top entry failed or the list is empty.
    pub best_location: Option<ComparisonEntry>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ComparisonItem {
    Scored(ComparisonEntry),
    Failed(ItemError),
}

impl ComparisonItem {
    /// Overall score used for ordering; failed entries sort as zero.
    pub fn overall_score(&self) -> f64 {
        match self {
            ComparisonItem::Scored(entry) => entry.scores.overall,
            ComparisonItem::Failed(_) => 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonEntry {
    pub name: String,
    pub location: Coordinate,
    pub gwp_class: GwpClass,
    pub metrics: SiteMetrics,
    pub scores: SiteScores,
    pub conclusion: String,
    /// 1-based position in the sorted comparison list.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rank: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteMetrics {
    pub ndvi: f64,
    pub ndwi: f64,
    pub elevation: f64,
}

/// Component scores on a 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteScores {
    pub overall: f64,
    pub gwp: f64,
    pub vegetation: f64,
    pub water_content: f64,
    pub elevation: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_batch_item_shape() {
        let item = BatchItem::Failed(ItemError {
            name: None,
            location: Coordinate::new(12.0, 77.0),
            error: "Outside Dharwad district".into(),
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["error"], "Outside Dharwad district");
        assert!(json.get("name").is_none());
        assert!(item.is_error());
    }

    #[test]
    fn test_null_weather_serialized() {
        let json = serde_json::to_value(Option::<CurrentWeather>::None).unwrap();
        assert!(json.is_null());
    }
}
