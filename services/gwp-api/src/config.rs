//! Service configuration loading and types.

use anyhow::{Context, Result};
use gwp_common::BoundingBox;
use gwp_protocol::WaterSourcesConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding `weather.api_key`.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Environment variable overriding `district.bounds` as "minx,miny,maxx,maxy".
pub const DISTRICT_BBOX_ENV: &str = "GWP_DISTRICT_BBOX";

/// Top-level service configuration, loaded from `config/gwp.yaml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GwpConfig {
    #[serde(default)]
    pub district: DistrictConfig,

    /// PNG overlay with the classified GWP map.
    #[serde(default = "default_overlay_path")]
    pub overlay_path: PathBuf,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    /// Surface water bodies used by the nearby-sources lookup.
    #[serde(default)]
    pub water_sources: WaterSourcesConfig,
}

impl GwpConfig {
    /// Load from a YAML file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read: {:?}", path))?;
            let config: GwpConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse: {:?}", path))?;
            tracing::info!(
                district = %config.district.name,
                water_sources = config.water_sources.len(),
                "Loaded configuration from {:?}",
                path
            );
            config
        } else {
            tracing::warn!("Config file {:?} does not exist, using defaults", path);
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.weather.api_key = Some(key.trim().to_string());
            }
        }

        if let Ok(bbox) = std::env::var(DISTRICT_BBOX_ENV) {
            config.override_bounds(&bbox)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Replace the district bounds with a "minx,miny,maxx,maxy" string.
    pub fn override_bounds(&mut self, csv: &str) -> Result<()> {
        self.district.bounds = BoundingBox::from_csv(csv)
            .with_context(|| format!("Invalid {}: {:?}", DISTRICT_BBOX_ENV, csv))?;
        tracing::info!(bounds = csv, "District bounds overridden from environment");
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let b = &self.district.bounds;
        if b.min_x >= b.max_x || b.min_y >= b.max_y {
            anyhow::bail!(
                "district bounds are empty: lon {}..{}, lat {}..{}",
                b.min_x,
                b.max_x,
                b.min_y,
                b.max_y
            );
        }
        if self.limits.max_batch == 0 || self.limits.max_comparison == 0 {
            anyhow::bail!("request limits must be greater than zero");
        }
        Ok(())
    }
}

fn default_overlay_path() -> PathBuf {
    PathBuf::from("gwp_overlay.png")
}

/// District name and geographic limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictConfig {
    pub name: String,
    pub bounds: BoundingBox,
}

impl Default for DistrictConfig {
    fn default() -> Self {
        Self {
            name: "Dharwad".to_string(),
            bounds: BoundingBox::DHARWAD,
        }
    }
}

/// OpenWeatherMap access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Without a key the service reports demo weather.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_weather_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Per-request item limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,

    #[serde(default = "default_max_comparison")]
    pub max_comparison: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_batch: default_max_batch(),
            max_comparison: default_max_comparison(),
        }
    }
}

fn default_max_batch() -> usize {
    50
}

fn default_max_comparison() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::temp_config;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = GwpConfig::load("/nonexistent/gwp.yaml").unwrap();
        assert_eq!(config.district.name, "Dharwad");
        assert_eq!(config.limits.max_batch, 50);
        assert_eq!(config.limits.max_comparison, 5);
        assert_eq!(config.water_sources.len(), 10);
    }

    #[test]
    fn test_partial_yaml() {
        let cfg = temp_config(
            r#"
overlay_path: maps/overlay.png
limits:
  max_batch: 10
"#,
        );
        let config = GwpConfig::load(&cfg.path).unwrap();
        assert_eq!(config.overlay_path, PathBuf::from("maps/overlay.png"));
        assert_eq!(config.limits.max_batch, 10);
        assert_eq!(config.limits.max_comparison, 5);
        assert_eq!(config.weather.timeout_secs, 10);
    }

    #[test]
    fn test_custom_district() {
        let cfg = temp_config(
            r#"
district:
  name: Belagavi
  bounds:
    min_x: 74.0
    min_y: 15.5
    max_x: 75.0
    max_y: 16.5
water_sources:
  sources: []
"#,
        );
        let config = GwpConfig::load(&cfg.path).unwrap();
        assert_eq!(config.district.name, "Belagavi");
        assert!(config.district.bounds.contains_lat_lon(16.0, 74.5));
        assert!(config.water_sources.is_empty());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let cfg = temp_config(
            r#"
district:
  name: Nowhere
  bounds: { min_x: 75.0, min_y: 15.0, max_x: 74.0, max_y: 16.0 }
"#,
        );
        assert!(GwpConfig::load(&cfg.path).is_err());
    }

    #[test]
    fn test_override_bounds() {
        let mut config = GwpConfig::default();
        config.override_bounds("74.0,15.5,75.0,16.5").unwrap();
        assert!(config.district.bounds.contains_lat_lon(16.2, 74.1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_override_bounds_rejects_garbage() {
        let mut config = GwpConfig::default();
        assert!(config.override_bounds("74.0,15.5,75.0").is_err());
        assert!(config.override_bounds("west,15.5,75.0,16.5").is_err());
        assert_eq!(config.district.bounds, BoundingBox::DHARWAD);
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let cfg = temp_config("limits: [1, 2");
        assert!(GwpConfig::load(&cfg.path).is_err());
    }
}
