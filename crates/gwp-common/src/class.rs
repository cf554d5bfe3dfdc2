//! Groundwater potential classes and feature impact labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-level groundwater potential label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GwpClass {
    Low,
    Moderate,
    High,
}

impl GwpClass {
    /// Ordinal value used by the continuous GWP models (0, 1, 2).
    pub fn value(self) -> u8 {
        match self {
            GwpClass::Low => 0,
            GwpClass::Moderate => 1,
            GwpClass::High => 2,
        }
    }

    /// Classify a continuous GWP value.
    pub fn from_value_score(value: f64) -> Self {
        if value > 1.5 {
            GwpClass::High
        } else if value > 0.7 {
            GwpClass::Moderate
        } else {
            GwpClass::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GwpClass::Low => "Low",
            GwpClass::Moderate => "Moderate",
            GwpClass::High => "High",
        }
    }

    /// Pick one of three values keyed by class.
    pub fn pick<T>(self, high: T, moderate: T, low: T) -> T {
        match self {
            GwpClass::High => high,
            GwpClass::Moderate => moderate,
            GwpClass::Low => low,
        }
    }
}

impl fmt::Display for GwpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction in which a feature pushed the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_score_thresholds() {
        assert_eq!(GwpClass::from_value_score(2.0), GwpClass::High);
        assert_eq!(GwpClass::from_value_score(1.5), GwpClass::Moderate);
        assert_eq!(GwpClass::from_value_score(0.71), GwpClass::Moderate);
        assert_eq!(GwpClass::from_value_score(0.7), GwpClass::Low);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&GwpClass::High).unwrap(), "\"High\"");
        assert_eq!(
            serde_json::to_string(&Impact::Negative).unwrap(),
            "\"negative\""
        );
    }
}
