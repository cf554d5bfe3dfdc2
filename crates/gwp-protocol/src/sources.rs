//! Named surface water bodies.
//!
//! Rivers, canals, lakes and tanks are loaded from configuration and matched
//! against a query point by great-circle distance.

use gwp_common::Coordinate;
use serde::{Deserialize, Serialize};

/// Kind of surface water body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterSourceKind {
    River,
    Stream,
    Canal,
    Lake,
    Reservoir,
    Tank,
}

impl WaterSourceKind {
    /// Standing water that can feed aquifer recharge.
    pub fn is_impoundment(self) -> bool {
        matches!(self, WaterSourceKind::Lake | WaterSourceKind::Reservoir)
    }
}

/// A configured water body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterSource {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: WaterSourceKind,
    /// Flowing water present all year (rivers, streams, canals).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perennial: Option<bool>,
    /// Storage capacity in million cubic metres (lakes, tanks, reservoirs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_mcm: Option<f64>,
}

impl WaterSource {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

/// Configuration block listing water bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterSourcesConfig {
    #[serde(default)]
    pub sources: Vec<WaterSource>,
}

impl WaterSourcesConfig {
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for WaterSourcesConfig {
    /// Surveyed rivers, canals and tanks around Dharwad.
    fn default() -> Self {
        let flowing = |name: &str, lat: f64, lon: f64, kind: WaterSourceKind| WaterSource {
            name: name.to_string(),
            lat,
            lon,
            kind,
            perennial: Some(kind != WaterSourceKind::Stream),
            capacity_mcm: None,
        };
        let standing = |name: &str, lat: f64, lon: f64, kind: WaterSourceKind, capacity: f64| WaterSource {
            name: name.to_string(),
            lat,
            lon,
            kind,
            perennial: None,
            capacity_mcm: Some(capacity),
        };

        Self {
            sources: vec![
                flowing("Malaprabha River", 15.4589, 75.0234, WaterSourceKind::River),
                flowing("Bennihalla Stream", 15.4656, 75.0534, WaterSourceKind::Stream),
                flowing("Tunga River Tributary", 15.4289, 75.0789, WaterSourceKind::River),
                flowing("Dharwad Canal", 15.4345, 75.0123, WaterSourceKind::Canal),
                flowing("Irrigation Canal - Main", 15.4678, 74.9934, WaterSourceKind::Canal),
                standing("Navalur Lake", 15.4534, 75.0267, WaterSourceKind::Lake, 2.5),
                standing("Unkal Lake", 15.4520, 75.0785, WaterSourceKind::Lake, 1.8),
                standing("Kelgeri Lake", 15.4389, 74.9834, WaterSourceKind::Lake, 1.2),
                standing("Kamalapur Reservoir", 15.4678, 75.1034, WaterSourceKind::Reservoir, 5.2),
                standing("Amminbhavi Tank", 15.4234, 75.0456, WaterSourceKind::Tank, 0.8),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sources() {
        let config = WaterSourcesConfig::default();
        assert_eq!(config.len(), 10);
        let stream = &config.sources[1];
        assert_eq!(stream.name, "Bennihalla Stream");
        assert_eq!(stream.perennial, Some(false));
        assert!(config.sources[5].kind.is_impoundment());
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
sources:
  - name: Test Lake
    lat: 15.5
    lon: 75.0
    type: lake
    capacity_mcm: 1.5
"#;
        let config: WaterSourcesConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sources[0].kind, WaterSourceKind::Lake);
        assert_eq!(config.sources[0].perennial, None);
    }
}
