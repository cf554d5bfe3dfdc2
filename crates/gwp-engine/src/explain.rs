//! Plain-language factor list shown next to every prediction.

use gwp_common::GwpClass;
use gwp_protocol::Explanation;

use crate::sampler::SiteFeatures;

pub fn explain_prediction(site: &SiteFeatures) -> Explanation {
    let vegetation = if site.ndvi > 0.5 {
        "✅ High vegetation (NDVI > 0.5) indicates good soil moisture retention"
    } else if site.ndvi > 0.3 {
        "⚠️ Moderate vegetation (NDVI 0.3-0.5) shows average water retention"
    } else {
        "❌ Low vegetation (NDVI < 0.3) suggests poor water retention"
    };

    let water = if site.ndwi > 0.3 {
        "✅ High water content (NDWI > 0.3) indicates good groundwater potential"
    } else if site.ndwi > 0.0 {
        "⚠️ Moderate water content (NDWI 0-0.3)"
    } else {
        "❌ Low water content (NDWI < 0) suggests dry conditions"
    };

    let elevation = if site.dem < 600.0 {
        "✅ Low elevation (<600m) favors groundwater accumulation"
    } else if site.dem < 750.0 {
        "⚠️ Moderate elevation (600-750m)"
    } else {
        "❌ High elevation (>750m) reduces groundwater accumulation"
    };

    Explanation {
        factors: vec![vegetation.into(), water.into(), elevation.into()],
        conclusion: conclusion(site.gwp_class).to_string(),
    }
}

pub fn conclusion(class: GwpClass) -> &'static str {
    class.pick(
        "🌟 This location has EXCELLENT groundwater potential for borewell drilling.",
        "⚡ This location has MODERATE groundwater potential. Drilling may succeed with proper depth.",
        "⚠️ This location has LOW groundwater potential. Consider alternative locations.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SIMULATED_DATA_SOURCE;

    #[test]
    fn test_factor_per_feature() {
        let site = SiteFeatures {
            ndvi: 0.45,
            ndwi: -0.02,
            dem: 580.0,
            gwp_class: GwpClass::Moderate,
            data_source: SIMULATED_DATA_SOURCE,
        };
        let explanation = explain_prediction(&site);
        assert_eq!(explanation.factors.len(), 3);
        assert!(explanation.factors[0].starts_with("⚠️ Moderate vegetation"));
        assert!(explanation.factors[1].starts_with("❌"));
        assert!(explanation.factors[2].starts_with("✅"));
        assert!(explanation.conclusion.contains("MODERATE"));
    }
}
