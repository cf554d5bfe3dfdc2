//! Layered subsurface model for the 3D aquifer viewer.

use gwp_common::{round_to, Coordinate, GwpClass};
use gwp_protocol::analysis::{
    AquiferLayer, AquiferResponse, DrillingRecommendation, MeshPoint, VisualizationData,
};
use rand::Rng;

use crate::sampler::SiteFeatures;

const METRES_TO_FEET: f64 = 3.28084;
const TOPSOIL_M: f64 = 5.0;
const BEDROCK_M: f64 = 100.0;

struct LayerSpec {
    name: &'static str,
    thickness: f64,
    material: &'static str,
    permeability: &'static str,
    water_bearing: bool,
    yield_potential: Option<GwpClass>,
    color: &'static str,
}

pub fn aquifer_profile<R: Rng + ?Sized>(
    location: Coordinate,
    site: &SiteFeatures,
    rng: &mut R,
) -> AquiferResponse {
    let class = site.gwp_class;
    let weathered = class.pick(20.0, 15.0, 10.0);
    let fractured = class.pick(40.0, 30.0, 20.0);
    let water_table_depth = match class {
        GwpClass::High => rng.gen_range(8.0..15.0),
        GwpClass::Moderate => rng.gen_range(15.0..30.0),
        GwpClass::Low => rng.gen_range(30.0..60.0),
    };

    let specs = [
        LayerSpec {
            name: "Topsoil",
            thickness: TOPSOIL_M,
            material: "Clay and Silt",
            permeability: "Low",
            water_bearing: false,
            yield_potential: None,
            color: "#8B4513",
        },
        LayerSpec {
            name: "Weathered Zone",
            thickness: weathered,
            material: "Weathered Granite/Basalt",
            permeability: "Medium to High",
            water_bearing: true,
            yield_potential: Some(class),
            color: "#CD853F",
        },
        LayerSpec {
            name: "Fractured Rock",
            thickness: fractured,
            material: "Fractured Basalt/Granite",
            permeability: "Medium",
            water_bearing: true,
            yield_potential: Some(class),
            color: "#A9A9A9",
        },
        LayerSpec {
            name: "Compact Bedrock",
            thickness: BEDROCK_M,
            material: "Compact Basalt/Granite",
            permeability: "Very Low",
            water_bearing: false,
            yield_potential: None,
            color: "#2F4F4F",
        },
    ];

    let mut depth = 0.0;
    let mut bedrock_top = 0.0;
    let mut layers = Vec::with_capacity(specs.len());
    for spec in &specs {
        if spec.name == "Compact Bedrock" {
            bedrock_top = depth;
        }
        layers.push(AquiferLayer {
            name: spec.name.to_string(),
            depth_from_m: depth,
            depth_to_m: depth + spec.thickness,
            thickness_m: spec.thickness,
            material: spec.material.to_string(),
            permeability: spec.permeability.to_string(),
            water_bearing: spec.water_bearing,
            yield_potential: spec.yield_potential,
            color: spec.color.to_string(),
        });
        depth += spec.thickness;
    }

    let recommended = bedrock_top * 0.6;
    let mesh_points = layers
        .iter()
        .map(|layer| MeshPoint {
            layer: layer.name.clone(),
            top: layer.depth_from_m,
            bottom: layer.depth_to_m,
            color: layer.color.clone(),
        })
        .collect();

    AquiferResponse {
        location,
        gwp_class: class,
        surface_elevation_m: round_to(site.dem, 1),
        water_table_depth_m: round_to(water_table_depth, 1),
        water_table_elevation_m: round_to(site.dem - water_table_depth, 1),
        total_aquifer_thickness_m: weathered + fractured,
        layers,
        drilling_recommendation: DrillingRecommendation {
            recommended_depth_m: round_to(recommended, 1),
            recommended_depth_ft: round_to(recommended * METRES_TO_FEET, 1),
            target_layers: vec!["Weathered Zone".to_string(), "Fractured Rock".to_string()],
        },
        visualization_data: VisualizationData { mesh_points },
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
            ndvi: 0.5,
            ndwi: 0.2,
            dem: 620.0,
            gwp_class: class,
            data_source: MAP_DATA_SOURCE,
        }
    }

    #[test]
    fn test_high_class_layers_are_contiguous() {
        let mut rng = StdRng::seed_from_u64(11);
        let profile = aquifer_profile(Coordinate::new(15.45, 75.0), &site(GwpClass::High), &mut rng);

        assert_eq!(profile.layers.len(), 4);
        for pair in profile.layers.windows(2) {
            assert_eq!(pair[0].depth_to_m, pair[1].depth_from_m);
        }
        assert_eq!(profile.layers[1].thickness_m, 20.0);
        assert_eq!(profile.layers[1].yield_potential, Some(GwpClass::High));
        assert_eq!(profile.total_aquifer_thickness_m, 60.0);
        // bedrock starts at 65m
        assert_eq!(profile.drilling_recommendation.recommended_depth_m, 39.0);
        assert_eq!(profile.drilling_recommendation.recommended_depth_ft, 128.0);
        assert!((8.0..=15.0).contains(&profile.water_table_depth_m));
        assert_eq!(profile.visualization_data.mesh_points.len(), 4);
    }

    #[test]
    fn test_low_class_has_deep_water_table() {
        let mut rng = StdRng::seed_from_u64(11);
        let profile = aquifer_profile(Coordinate::new(15.45, 75.0), &site(GwpClass::Low), &mut rng);
        assert!((30.0..=60.0).contains(&profile.water_table_depth_m));
        assert_eq!(profile.total_aquifer_thickness_m, 30.0);
    }

    #[test]
    fn test_water_bearing_layers_carry_yield() {
        let mut rng = StdRng::seed_from_u64(3);
        let profile = aquifer_profile(Coordinate::new(15.45, 75.0), &site(GwpClass::Moderate), &mut rng);
        let yields: Vec<_> = profile.layers.iter().map(|l| l.yield_potential).collect();
        assert_eq!(
            yields,
            vec![None, Some(GwpClass::Moderate), Some(GwpClass::Moderate), None]
        );
        assert_eq!(profile.layers[2].name, "Fractured Rock");
    }
}
