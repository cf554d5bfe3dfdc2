//! Explainability (XAI) block attached to single predictions.

use gwp_common::{GwpClass, Impact};
use serde::{Deserialize, Serialize};

/// Full model explanation for one prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XaiExplanation {
    pub prediction: GwpClass,
    /// Mean of the confidence breakdown, within `[0, 1]`.
    pub confidence: f64,
    pub feature_importance: FeatureImportance,
    pub reasoning_chain: Vec<ReasoningStep>,
    pub decision_logic: Vec<DecisionStep>,
    pub confidence_breakdown: ConfidenceBreakdown,
    pub hydrogeological_validation: HydrogeologicalValidation,
    pub model_transparency: ModelTransparency,
}

/// Per-feature attribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureImportance {
    pub vegetation_ndvi: FeatureDetail,
    pub water_content_ndwi: FeatureDetail,
    pub elevation_dem: FeatureDetail,
    pub overall_confidence: f64,
}

impl FeatureImportance {
    /// Features with their wire keys, in declaration order.
    pub fn features(&self) -> [(&'static str, &FeatureDetail); 3] {
        [
            ("vegetation_ndvi", &self.vegetation_ndvi),
            ("water_content_ndwi", &self.water_content_ndwi),
            ("elevation_dem", &self.elevation_dem),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureDetail {
    pub value: f64,
    /// Signed contribution points.
    pub contribution_score: i32,
    /// Share of total absolute contribution, 0-100.
    pub importance_percentage: f64,
    pub impact: Impact,
    pub interpretation: String,
}

/// One ranked factor in the reasoning chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReasoningStep {
    pub rank: usize,
    pub factor: String,
    /// Percentage rendered with a trailing `%`, e.g. `"46.2%"`.
    pub importance: String,
    pub status: Impact,
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionStep {
    pub step: u8,
    pub stage: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub probabilities: Option<ClassProbabilities>,
}

/// Class probabilities reported at the classification step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClassProbabilities {
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Moderate")]
    pub moderate: f64,
    #[serde(rename = "Low")]
    pub low: f64,
}

impl ClassProbabilities {
    pub fn get(&self, class: GwpClass) -> f64 {
        class.pick(self.high, self.moderate, self.low)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceBreakdown {
    pub data_quality: f64,
    pub model_accuracy: f64,
    pub spatial_resolution: f64,
    pub feature_reliability: f64,
}

impl ConfidenceBreakdown {
    pub fn values(&self) -> [f64; 4] {
        [
            self.data_quality,
            self.model_accuracy,
            self.spatial_resolution,
            self.feature_reliability,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydrogeologicalValidation {
    pub overall_status: String,
    pub validations: Vec<ValidationCheck>,
    pub scientific_basis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationCheck {
    pub principle: String,
    pub status: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelTransparency {
    pub architecture: String,
    pub training_data: String,
    pub test_accuracy: String,
    pub f1_score: String,
    pub interpretability_method: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probabilities_use_class_names() {
        let probs = ClassProbabilities {
            high: 0.85,
            moderate: 0.15,
            low: 0.12,
        };
        let json = serde_json::to_value(probs).unwrap();
        assert_eq!(json["High"], 0.85);
        assert_eq!(probs.get(GwpClass::Low), 0.12);
    }
}
