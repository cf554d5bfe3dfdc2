//! Borewell investment appraisal.

use gwp_common::{round_to, Coordinate};
use gwp_protocol::analysis::{
    CostBenefitResponse, CostBreakdown, ExpectedBenefits, RoiAnalysis, ValueOrLabel,
};

use crate::sampler::SiteFeatures;

const CASING_COST_PER_FT: f64 = 150.0;
const DRILLING_COST_PER_FT: f64 = 250.0;
const PUMP_AND_EQUIPMENT: f64 = 35_000.0;
const ELECTRICITY_CONNECTION: f64 = 15_000.0;
const MISCELLANEOUS: f64 = 10_000.0;

const PUMPING_HOURS_PER_DAY: f64 = 8.0;
const M3_PER_ACRE_YEAR: f64 = 5_000.0;
const INCOME_PER_ACRE: f64 = 80_000.0;
const OPERATIONAL_COST_YEARLY: f64 = 25_000.0;

pub fn cost_benefit(location: Coordinate, site: &SiteFeatures) -> CostBenefitResponse {
    let class = site.gwp_class;
    let depth_ft = class.pick(100.0, 150.0, 220.0);
    let success_probability = class.pick(0.90, 0.65, 0.40);
    let yield_lpm = class.pick(1000.0, 600.0, 300.0);

    let drilling = depth_ft * DRILLING_COST_PER_FT;
    let casing = depth_ft * CASING_COST_PER_FT;
    let total = drilling + casing + PUMP_AND_EQUIPMENT + ELECTRICITY_CONNECTION + MISCELLANEOUS;

    let daily_liters = yield_lpm * 60.0 * PUMPING_HOURS_PER_DAY;
    let yearly_m3 = daily_liters * 30.0 * 12.0 / 1000.0;
    let acres = yearly_m3 / M3_PER_ACRE_YEAR;
    let income = acres * INCOME_PER_ACRE;
    let net = income - OPERATIONAL_COST_YEARLY;

    let payback = if net > 0.0 { Some(total / net) } else { None };
    let roi = |years: f64| round_to((net * years - total) / total * 100.0, 1);

    let verdict = match payback {
        Some(p) if success_probability > 0.6 && p < 5.0 => "RECOMMENDED",
        Some(p) if p < 8.0 => "MODERATE RISK",
        _ => "HIGH RISK",
    };
    let payback_text = match payback {
        Some(p) => format!("{}", round_to(p, 1)),
        None => "inf".to_string(),
    };

    CostBenefitResponse {
        location,
        gwp_class: class,
        success_probability: round_to(success_probability * 100.0, 1),
        cost_breakdown: CostBreakdown {
            drilling_cost: drilling as i64,
            casing_cost: casing as i64,
            pump_and_equipment: PUMP_AND_EQUIPMENT as i64,
            electricity_connection: ELECTRICITY_CONNECTION as i64,
            miscellaneous: MISCELLANEOUS as i64,
            total_investment: total as i64,
        },
        expected_benefits: ExpectedBenefits {
            daily_water_yield_liters: daily_liters as i64,
            yearly_water_m3: yearly_m3 as i64,
            irrigable_area_acres: round_to(acres, 2),
            yearly_crop_income_inr: income as i64,
            operational_cost_yearly_inr: OPERATIONAL_COST_YEARLY as i64,
            net_yearly_benefit_inr: net as i64,
        },
        roi_analysis: RoiAnalysis {
            payback_period_years: match payback {
                Some(p) => ValueOrLabel::Value(round_to(p, 1)),
                None => ValueOrLabel::Label("Not viable".to_string()),
            },
            roi_5_years_percent: roi(5.0),
            roi_10_years_percent: roi(10.0),
            npv_10_years: (net * 10.0 - total) as i64,
            break_even_month: if net > 0.0 {
                ValueOrLabel::Value((total / (net / 12.0)) as i64)
            } else {
                ValueOrLabel::Label("N/A".to_string())
            },
        },
        recommendation: format!(
            "{}: Expected payback in {} years with {:.0}% success rate.",
            verdict,
            payback_text,
            success_probability * 100.0
        ),
        risk_factors: vec![
            format!("Success probability: {:.0}%", success_probability * 100.0),
            format!("Groundwater potential: {}", class),
            "Market price volatility".to_string(),
            "Monsoon dependency".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::MAP_DATA_SOURCE;
    use gwp_common::GwpClass;

    fn site(class: GwpClass) -> SiteFeatures {
        SiteFeatures {
            ndvi: 0.4,
            ndwi: 0.1,
            dem: 660.0,
            gwp_class: class,
            data_source: MAP_DATA_SOURCE,
        }
    }

    #[test]
    fn test_high_class_costs() {
        let resp = cost_benefit(Coordinate::new(15.45, 75.0), &site(GwpClass::High));
        let costs = &resp.cost_breakdown;
        assert_eq!(costs.drilling_cost, 25_000);
        assert_eq!(costs.casing_cost, 15_000);
        assert_eq!(costs.total_investment, 100_000);

        let benefits = &resp.expected_benefits;
        assert_eq!(benefits.daily_water_yield_liters, 480_000);
        assert_eq!(benefits.yearly_water_m3, 172_800);
        assert_eq!(benefits.net_yearly_benefit_inr, 2_739_800);
        assert!(resp.recommendation.starts_with("RECOMMENDED"));
        assert_eq!(resp.risk_factors[0], "Success probability: 90%");
    }

    #[test]
    fn test_low_class_is_still_viable() {
        let resp = cost_benefit(Coordinate::new(15.45, 75.0), &site(GwpClass::Low));
        assert_eq!(resp.cost_breakdown.total_investment, 148_000);
        assert!(matches!(resp.roi_analysis.payback_period_years, ValueOrLabel::Value(_)));
        // success 0.40 is below the RECOMMENDED threshold
        assert!(resp.recommendation.starts_with("MODERATE RISK"));
    }

    #[test]
    fn test_success_probability_is_a_percentage() {
        let at = Coordinate::new(15.45, 75.0);
        let percents: Vec<f64> = [GwpClass::High, GwpClass::Moderate, GwpClass::Low]
            .iter()
            .map(|&class| cost_benefit(at, &site(class)).success_probability)
            .collect();
        assert_eq!(percents, vec![90.0, 65.0, 40.0]);
    }

    #[test]
    fn test_irrigable_area_has_two_decimals() {
        let resp = cost_benefit(Coordinate::new(15.45, 75.0), &site(GwpClass::High));
        assert_eq!(resp.expected_benefits.irrigable_area_acres, 34.56);
    }
}
