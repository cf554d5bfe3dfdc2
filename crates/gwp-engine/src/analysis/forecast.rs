//! Precipitation outlook and its effect on recharge.

use chrono::{Duration, NaiveDate};
use gwp_common::{round_to, Coordinate, GwpClass};
use gwp_protocol::analysis::{DailyForecast, ForecastResponse, ForecastSummary, GroundwaterImpact};
use rand::Rng;

/// Share of rainfall assumed to reach the aquifer.
pub const RECHARGE_COEFFICIENT: f64 = 0.15;

/// Longest simulated outlook, in days.
const MAX_SIMULATED_DAYS: u32 = 7;

/// One 3-hourly forecast entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSlot {
    /// `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub temp_c: f64,
    pub humidity: f64,
    pub precipitation_mm: f64,
}

fn recharge_potential(precipitation_mm: f64) -> &'static str {
    if precipitation_mm > 20.0 {
        "High"
    } else if precipitation_mm > 5.0 {
        "Moderate"
    } else {
        "Low"
    }
}

fn close_day(date: String, precip: f64, temps: &[f64], humidity: &[f64]) -> DailyForecast {
    let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len().max(1) as f64;
    DailyForecast {
        date,
        total_precipitation_mm: round_to(precip, 1),
        avg_temp_c: round_to(mean(temps), 1),
        avg_humidity: round_to(mean(humidity), 0),
        groundwater_recharge_potential: recharge_potential(precip).to_string(),
    }
}

/// Fold consecutive slots sharing a calendar date into daily totals.
pub fn aggregate_daily(slots: &[ForecastSlot]) -> Vec<DailyForecast> {
    let mut days = Vec::new();
    let mut current: Option<String> = None;
    let mut precip = 0.0;
    let mut temps = Vec::new();
    let mut humidity = Vec::new();

    for slot in slots {
        let date = slot
            .timestamp
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string();

        if current.as_deref() != Some(date.as_str()) {
            if let Some(done) = current.take() {
                days.push(close_day(done, precip, &temps, &humidity));
            }
            current = Some(date);
            precip = 0.0;
            temps.clear();
            humidity.clear();
        }

        precip += slot.precipitation_mm;
        temps.push(round_to(slot.temp_c, 1));
        humidity.push(slot.humidity);
    }

    if let Some(done) = current {
        days.push(close_day(done, precip, &temps, &humidity));
    }
    days
}

/// Synthetic outlook used when the live forecast is unavailable.
pub fn simulated_daily<R: Rng + ?Sized>(days: u32, today: NaiveDate, rng: &mut R) -> Vec<DailyForecast> {
    (0..days.min(MAX_SIMULATED_DAYS))
        .map(|i| {
            let date = today + Duration::days(i as i64);
            let precip = if rng.gen::<f64>() > 0.6 {
                // Exponential with mean 10mm
                -10.0 * (1.0 - rng.gen::<f64>()).ln()
            } else {
                0.0
            };

            DailyForecast {
                date: date.format("%Y-%m-%d").to_string(),
                total_precipitation_mm: round_to(precip, 1),
                avg_temp_c: round_to(25.0 + rng.gen_range(-5.0..5.0), 1),
                avg_humidity: (60.0 + rng.gen_range(-20.0..30.0_f64)).trunc(),
                groundwater_recharge_potential: recharge_potential(precip).to_string(),
            }
        })
        .collect()
}

/// Assemble the response from daily values.
pub fn precipitation_forecast(
    location: Coordinate,
    current_gwp: GwpClass,
    daily: Vec<DailyForecast>,
    data_source: &str,
    note: Option<String>,
) -> ForecastResponse {
    let total: f64 = daily.iter().map(|d| d.total_precipitation_mm).sum();
    let recharge = total * RECHARGE_COEFFICIENT;
    let rainy_days = daily.iter().filter(|d| d.total_precipitation_mm > 2.0).count();

    // First day wins ties
    let peak = daily
        .iter()
        .fold(None::<&DailyForecast>, |best, d| match best {
            Some(b) if b.total_precipitation_mm >= d.total_precipitation_mm => Some(b),
            _ => Some(d),
        })
        .map(|d| d.date.clone())
        .unwrap_or_else(|| "N/A".to_string());

    let (improvement, rating) = if total > 100.0 {
        ("Significant", "Excellent")
    } else if total > 50.0 {
        ("Moderate", "Good")
    } else {
        ("Minimal", "Poor")
    };

    ForecastResponse {
        location,
        current_gwp,
        forecast_period_days: daily.len(),
        daily_forecast: daily,
        summary: ForecastSummary {
            total_expected_rainfall_mm: round_to(total, 1),
            expected_groundwater_recharge_mm: round_to(recharge, 1),
            rainy_days,
            peak_rainfall_day: peak,
        },
        impact_on_groundwater: GroundwaterImpact {
            current_status: current_gwp,
            expected_improvement: improvement.to_string(),
            recharge_potential_rating: rating.to_string(),
        },
        recommendations: vec![
            if total > 50.0 {
                "Prepare rainwater harvesting structures"
            } else {
                "Monitor rainfall"
            }
            .to_string(),
            "Check recharge pit functionality".to_string(),
            if total > 20.0 {
                "Avoid excessive groundwater extraction during recharge period"
            } else {
                "Normal water use permitted"
            }
            .to_string(),
        ],
        data_source: data_source.to_string(),
        note,
    }
}
