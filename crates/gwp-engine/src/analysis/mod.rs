//! Advanced analyses built on top of sampled site features.
//!
//! Each function is pure apart from the random source it is handed, which
//! callers seed per request so responses are reproducible.

pub mod alerts;
pub mod aquifer;
pub mod area;
pub mod atlas;
pub mod borewell;
pub mod compliance;
pub mod economics;
pub mod forecast;
pub mod land;
pub mod sources;
pub mod temporal;

pub use alerts::alert_subscription;
pub use aquifer::aquifer_profile;
pub use area::area_analysis;
pub use atlas::community_atlas;
pub use borewell::{borewell_predict, borewell_recommendation};
pub use compliance::compliance_check;
pub use economics::cost_benefit;
pub use forecast::{precipitation_forecast, ForecastSlot};
pub use land::{crop_suitability, drought_risk, rainfall_impact, recharge_zones};
pub use sources::nearby_sources;
pub use temporal::{satellite_timelapse, temporal_analysis};

use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `(year, month)` of the month `offset` months before `today`.
pub(crate) fn month_back(today: NaiveDate, offset: u32) -> (i32, u32) {
    let index = today.year() as i64 * 12 + today.month0() as i64 - offset as i64;
    (index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1)
}

pub(crate) fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[((month.max(1) - 1) % 12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_back_rolls_years() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(month_back(today, 0), (2026, 3));
        assert_eq!(month_back(today, 2), (2026, 1));
        assert_eq!(month_back(today, 3), (2025, 12));
        assert_eq!(month_back(today, 27), (2023, 12));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
    }
}
