//! Month-by-month reconstructions of the spectral indices.

use std::f64::consts::PI;

use chrono::NaiveDate;
use gwp_common::{round_to, GwpClass};
use gwp_protocol::analysis::{CurrentIndices, IndexTrends, MonthlySample, TimelapseFrame};
use rand::Rng;

use super::{month_back, month_name};
use crate::sampler::SiteFeatures;

/// Output of [`temporal_analysis`].
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalSeries {
    pub samples: Vec<MonthlySample>,
    pub trend: &'static str,
    pub change_percent: f64,
    pub analysis: String,
}

/// GWP history for the last `months` months, oldest first.
pub fn temporal_analysis<R: Rng + ?Sized>(
    site: &SiteFeatures,
    months: u32,
    today: NaiveDate,
    rng: &mut R,
) -> TemporalSeries {
    let samples: Vec<MonthlySample> = (0..months)
        .map(|i| {
            let offset = months - i - 1;
            let seasonal = 1.0 + 0.3 * ((offset % 12) as f64 * PI / 6.0).sin();

            let ndvi = site.ndvi * seasonal * (0.85 + rng.gen::<f64>() * 0.15);
            let ndwi = site.ndwi * seasonal * (0.9 + rng.gen::<f64>() * 0.1);
            let gwp_value = site.gwp_value() * seasonal;
            let (year, month) = month_back(today, offset);

            MonthlySample {
                month,
                year,
                ndvi: round_to(ndvi, 3),
                ndwi: round_to(ndwi, 3),
                gwp_class: GwpClass::from_value_score(gwp_value),
                gwp_value: round_to(gwp_value, 2),
            }
        })
        .collect();

    let first = samples.first().map(|s| s.gwp_value).unwrap_or(0.0);
    let last = samples.last().map(|s| s.gwp_value).unwrap_or(0.0);

    let trend = if last > first {
        "improving"
    } else if last < first {
        "declining"
    } else {
        "stable"
    };
    let change = if first != 0.0 {
        (last - first) / first * 100.0
    } else {
        0.0
    };

    TemporalSeries {
        samples,
        trend,
        change_percent: round_to(change, 1),
        analysis: format!(
            "Groundwater potential has been {} over the past {} months with {:.1}% change.",
            trend,
            months,
            change.abs()
        ),
    }
}

/// Output of [`satellite_timelapse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Timelapse {
    pub current: CurrentIndices,
    pub frames: Vec<TimelapseFrame>,
    pub trends: IndexTrends,
    pub insights: Vec<String>,
}

fn estimate_class(ndvi: f64, ndwi: f64) -> GwpClass {
    if ndvi > 0.3 && ndwi > 0.2 {
        GwpClass::High
    } else if ndvi > 0.2 || ndwi > 0.1 {
        GwpClass::Moderate
    } else {
        GwpClass::Low
    }
}

fn direction(first: f64, last: f64) -> &'static str {
    if last > first {
        "Improving"
    } else {
        "Declining"
    }
}

/// Seasonal NDVI/NDWI frames for the last `months` months, oldest first.
///
/// Monsoon months (June to September) push both indices up, the rest of the
/// year pulls them down.
pub fn satellite_timelapse<R: Rng + ?Sized>(
    site: &SiteFeatures,
    months: u32,
    today: NaiveDate,
    rng: &mut R,
) -> Timelapse {
    let frames: Vec<TimelapseFrame> = (0..months)
        .map(|i| {
            let (year, month) = month_back(today, months - i - 1);
            let season_factor = ((month as f64 - 6.0) * PI / 6.0).sin() * 0.3;

            let (ndvi, ndwi) = if (6..=9).contains(&month) {
                (
                    (site.ndvi + season_factor + rng.gen_range(0.0..0.15)).min(1.0),
                    (site.ndwi + season_factor + rng.gen_range(0.0..0.2)).min(1.0),
                )
            } else {
                (
                    (site.ndvi + season_factor - rng.gen_range(0.0..0.1)).max(-1.0),
                    (site.ndwi + season_factor - rng.gen_range(0.0..0.15)).max(-1.0),
                )
            };

            let vegetation_health = if ndvi > 0.4 {
                "Good"
            } else if ndvi > 0.2 {
                "Moderate"
            } else {
                "Poor"
            };
            let water_stress = if ndwi > 0.2 {
                "Low"
            } else if ndwi > 0.0 {
                "Moderate"
            } else {
                "High"
            };

            TimelapseFrame {
                date: format!("{:04}-{:02}", year, month),
                month: format!("{} {}", month_name(month), year),
                ndvi: round_to(ndvi, 3),
                ndwi: round_to(ndwi, 3),
                gwp_estimate: estimate_class(ndvi, ndwi),
                vegetation_health: vegetation_health.to_string(),
                water_stress: water_stress.to_string(),
            }
        })
        .collect();

    let n = frames.len().max(1) as f64;
    let (ndvi_trend, ndwi_trend) = match (frames.first(), frames.last()) {
        (Some(first), Some(last)) => (
            direction(first.ndvi, last.ndvi),
            direction(first.ndwi, last.ndwi),
        ),
        _ => ("Declining", "Declining"),
    };

    let trends = IndexTrends {
        ndvi_trend: ndvi_trend.to_string(),
        ndwi_trend: ndwi_trend.to_string(),
        average_ndvi: round_to(frames.iter().map(|f| f.ndvi).sum::<f64>() / n, 3),
        average_ndwi: round_to(frames.iter().map(|f| f.ndwi).sum::<f64>() / n, 3),
    };

    let insights = vec![
        format!("NDVI trend: {} over {} months", ndvi_trend, months),
        format!("NDWI trend: {} over {} months", ndwi_trend, months),
        "Monsoon months (Jun-Sep) show higher vegetation and water indices".to_string(),
        "Summer months (Mar-May) show stress indicators".to_string(),
    ];

    Timelapse {
        current: CurrentIndices {
            ndvi: round_to(site.ndvi, 3),
            ndwi: round_to(site.ndwi, 3),
            gwp_class: site.gwp_class,
        },
        frames,
        trends,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::MAP_DATA_SOURCE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn site(class: GwpClass) -> SiteFeatures {
        SiteFeatures {
            ndvi: 0.45,
            ndwi: 0.15,
            dem: 650.0,
            gwp_class: class,
            data_source: MAP_DATA_SOURCE,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_temporal_months_are_chronological() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = temporal_analysis(&site(GwpClass::High), 12, today(), &mut rng);

        assert_eq!(series.samples.len(), 12);
        let last = series.samples.last().unwrap();
        assert_eq!((last.year, last.month), (2026, 10));
        let first = &series.samples[0];
        assert_eq!((first.year, first.month), (2025, 11));
    }

    #[test]
    fn test_temporal_low_class_is_stable() {
        let mut rng = StdRng::seed_from_u64(1);
        let series = temporal_analysis(&site(GwpClass::Low), 6, today(), &mut rng);
        assert_eq!(series.trend, "stable");
        assert_eq!(series.change_percent, 0.0);
        assert!(series.samples.iter().all(|s| s.gwp_class == GwpClass::Low));
        assert_eq!(
            series.analysis,
            "Groundwater potential has been stable over the past 6 months with 0.0% change."
        );
    }

    #[test]
    fn test_temporal_seasonal_factor_on_last_month() {
        // Offset 0 has no seasonal adjustment.
        let mut rng = StdRng::seed_from_u64(3);
        let series = temporal_analysis(&site(GwpClass::High), 3, today(), &mut rng);
        let last = series.samples.last().unwrap();
        assert_eq!(last.gwp_value, 2.0);
        assert_eq!(last.gwp_class, GwpClass::High);
    }

    #[test]
    fn test_timelapse_frames() {
        let mut rng = StdRng::seed_from_u64(9);
        let lapse = satellite_timelapse(&site(GwpClass::Moderate), 12, today(), &mut rng);

        assert_eq!(lapse.frames.len(), 12);
        assert_eq!(lapse.frames[11].date, "2026-10");
        assert_eq!(lapse.frames[11].month, "October 2026");
        assert_eq!(lapse.frames[0].date, "2025-11");
        assert!(lapse
            .frames
            .iter()
            .all(|f| (-1.0..=1.0).contains(&f.ndvi) && (-1.0..=1.0).contains(&f.ndwi)));
        assert_eq!(lapse.insights.len(), 4);
        assert!(lapse.insights[0].starts_with("NDVI trend: "));
    }

    #[test]
    fn test_estimate_class() {
        assert_eq!(estimate_class(0.35, 0.25), GwpClass::High);
        assert_eq!(estimate_class(0.25, 0.0), GwpClass::Moderate);
        assert_eq!(estimate_class(0.1, 0.05), GwpClass::Low);
    }
}
