//! Application state for the GWP API.

use std::sync::Arc;

use anyhow::{Context, Result};
use bytes::Bytes;
use gwp_engine::{FeatureSampler, GwpRaster};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::GwpConfig;
use crate::weather::{OpenWeatherClient, WeatherProvider};

/// Shared application state.
pub struct AppState {
    pub config: GwpConfig,

    /// Feature sampler over the overlay, or the simulated fallback.
    pub sampler: FeatureSampler,

    pub weather: Arc<dyn WeatherProvider>,

    /// Encoded overlay served at `/gwp_overlay.png`.
    pub overlay_png: Option<Bytes>,

    /// Prometheus exporter handle, absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from configuration: load the overlay and create the
    /// weather client.
    ///
    /// A missing or unreadable overlay is not fatal; the service then runs on
    /// simulated features and says so in `/api/system-status`.
    pub fn new(config: GwpConfig) -> Result<Self> {
        let weather = OpenWeatherClient::new(&config.weather)
            .context("Failed to create weather client")?;

        let (sampler, overlay_png) = load_overlay(&config);
        if !sampler.is_map_backed() {
            tracing::warn!(
                path = %config.overlay_path.display(),
                "GWP overlay not loaded, predictions use simulated data"
            );
        }

        Ok(Self::with_parts(config, sampler, overlay_png, Arc::new(weather)))
    }

    pub fn with_parts(
        config: GwpConfig,
        sampler: FeatureSampler,
        overlay_png: Option<Bytes>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self {
            config,
            sampler,
            weather,
            overlay_png,
            prometheus: None,
        }
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}

fn load_overlay(config: &GwpConfig) -> (FeatureSampler, Option<Bytes>) {
    let district = &config.district;
    let path = &config.overlay_path;

    let bytes = match std::fs::read(path) {
        Ok(bytes) => Bytes::from(bytes),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Overlay not readable");
            return (FeatureSampler::simulated(&district.name, district.bounds), None);
        }
    };

    match GwpRaster::from_bytes(&bytes, district.bounds) {
        Ok(raster) => {
            let raster = raster.with_path(path);
            tracing::info!(
                path = %path.display(),
                width = raster.width(),
                height = raster.height(),
                "Loaded GWP overlay"
            );
            (
                FeatureSampler::new(&district.name, district.bounds, Some(raster)),
                Some(bytes),
            )
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to decode GWP overlay");
            (FeatureSampler::simulated(&district.name, district.bounds), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{banded_overlay, write_overlay};

    #[test]
    fn test_missing_overlay_falls_back() {
        let config = GwpConfig {
            overlay_path: "/nonexistent/gwp_overlay.png".into(),
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(!state.sampler.is_map_backed());
        assert!(state.overlay_png.is_none());
        assert_eq!(state.weather.status(), "demo");
    }

    #[test]
    fn test_overlay_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_overlay(dir.path(), &banded_overlay(9, 9));
        let config = GwpConfig {
            overlay_path: path,
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.sampler.is_map_backed());
        assert_eq!(&state.overlay_png.unwrap()[..4], b"\x89PNG");
    }

    #[test]
    fn test_corrupt_overlay_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gwp_overlay.png");
        std::fs::write(&path, b"not a png").unwrap();
        let config = GwpConfig {
            overlay_path: path,
            ..Default::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(!state.sampler.is_map_backed());
        assert!(state.overlay_png.is_none());
    }
}
