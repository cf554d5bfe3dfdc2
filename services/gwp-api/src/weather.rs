//! OpenWeatherMap client.
//!
//! Weather enriches predictions but never blocks them: a failed current-weather
//! lookup becomes `weather: null` and a failed forecast falls back to a
//! simulated outlook in the forecast handler.

use std::time::Duration;

use async_trait::async_trait;
use gwp_common::{round_to, Coordinate};
use gwp_engine::analysis::ForecastSlot;
use gwp_protocol::CurrentWeather;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::WeatherConfig;

/// 3-hour slots per forecast day.
const SLOTS_PER_DAY: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("no OpenWeather API key configured")]
    NoApiKey,

    #[error("Weather API unavailable: HTTP {0}")]
    Status(u16),

    #[error("Weather API request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Source of current conditions and short-range forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions, `None` when they cannot be obtained.
    async fn current(&self, at: Coordinate) -> Option<CurrentWeather>;

    /// 3-hourly forecast covering up to `days` days.
    async fn forecast(&self, at: Coordinate, days: u32) -> Result<Vec<ForecastSlot>, WeatherError>;

    /// Short readiness label.
    fn status(&self) -> &'static str;
}

/// Conditions reported when no API key is configured.
pub fn demo_weather() -> CurrentWeather {
    CurrentWeather {
        temperature: 28.5,
        humidity: 65.0,
        rainfall_today: 0.0,
        description: "Clear sky (Demo data)".to_string(),
    }
}

pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        at: Coordinate,
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::NoApiKey)?;
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(url = %url, "Querying weather API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", at.lat.to_string()),
                ("lon", at.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| e.without_url())?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }
        Ok(response.json().await.map_err(|e| e.without_url())?)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current(&self, at: Coordinate) -> Option<CurrentWeather> {
        if self.api_key.is_none() {
            return Some(demo_weather());
        }

        match self.get::<CurrentPayload>("weather", at).await {
            Ok(payload) => Some(payload.into()),
            Err(e) => {
                warn!(error = %e, "Current weather unavailable");
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn forecast(&self, at: Coordinate, days: u32) -> Result<Vec<ForecastSlot>, WeatherError> {
        let payload: ForecastPayload = self.get("forecast", at).await?;
        Ok(payload.into_slots(days as usize * SLOTS_PER_DAY))
    }

    fn status(&self) -> &'static str {
        if self.api_key.is_some() {
            "live"
        } else {
            "demo"
        }
    }
}

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct Rain {
    #[serde(rename = "1h", default)]
    one_hour: f64,
    #[serde(rename = "3h", default)]
    three_hours: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    main: MainBlock,
    weather: Vec<Condition>,
    #[serde(default)]
    rain: Option<Rain>,
}

impl From<CurrentPayload> for CurrentWeather {
    fn from(p: CurrentPayload) -> Self {
        CurrentWeather {
            temperature: p.main.temp,
            humidity: p.main.humidity,
            rainfall_today: p.rain.map(|r| r.one_hour).unwrap_or(0.0),
            description: p
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: MainBlock,
    #[serde(default)]
    rain: Option<Rain>,
}

#[derive(Debug, Deserialize)]
struct ForecastPayload {
    list: Vec<ForecastEntry>,
}

impl ForecastPayload {
    fn into_slots(self, limit: usize) -> Vec<ForecastSlot> {
        self.list
            .into_iter()
            .take(limit)
            .map(|entry| ForecastSlot {
                timestamp: entry.dt_txt,
                temp_c: round_to(entry.main.temp, 1),
                humidity: entry.main.humidity,
                precipitation_mm: entry.rain.map(|r| r.three_hours).unwrap_or(0.0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless() -> OpenWeatherClient {
        OpenWeatherClient::new(&WeatherConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_demo_weather_without_key() {
        let client = keyless();
        assert_eq!(client.status(), "demo");
        let weather = client.current(Coordinate::new(15.45, 75.0)).await.unwrap();
        assert_eq!(weather, demo_weather());
    }

    #[test]
    fn test_forecast_without_key_fails() {
        let client = keyless();
        let err = tokio_test::block_on(client.forecast(Coordinate::new(15.45, 75.0), 3)).unwrap_err();
        assert!(matches!(err, WeatherError::NoApiKey));
    }

    #[test]
    fn test_current_payload() {
        let json = r#"{
            "main": {"temp": 31.2, "humidity": 48},
            "weather": [{"description": "scattered clouds"}],
            "rain": {"1h": 0.4}
        }"#;
        let payload: CurrentPayload = serde_json::from_str(json).unwrap();
        let weather = CurrentWeather::from(payload);
        assert_eq!(weather.temperature, 31.2);
        assert_eq!(weather.humidity, 48.0);
        assert_eq!(weather.rainfall_today, 0.4);
        assert_eq!(weather.description, "scattered clouds");
    }

    #[test]
    fn test_current_payload_without_rain() {
        let json = r#"{"main": {"temp": 25, "humidity": 70}, "weather": []}"#;
        let weather = CurrentWeather::from(serde_json::from_str::<CurrentPayload>(json).unwrap());
        assert_eq!(weather.rainfall_today, 0.0);
        assert!(weather.description.is_empty());
    }

    #[test]
    fn test_forecast_payload_truncates() {
        let entry = |ts: &str, rain: Option<f64>| {
            let mut v = serde_json::json!({"dt_txt": ts, "main": {"temp": 24.46, "humidity": 80}});
            if let Some(mm) = rain {
                v["rain"] = serde_json::json!({"3h": mm});
            }
            v
        };
        let json = serde_json::json!({
            "list": [
                entry("2024-06-01 00:00:00", Some(2.5)),
                entry("2024-06-01 03:00:00", None),
                entry("2024-06-01 06:00:00", Some(1.0)),
            ]
        });
        let payload: ForecastPayload = serde_json::from_value(json).unwrap();
        let slots = payload.into_slots(2);

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].temp_c, 24.5);
        assert_eq!(slots[0].precipitation_mm, 2.5);
        assert_eq!(slots[1].precipitation_mm, 0.0);
    }
}
