//! Integration tests for overlay loading and map-backed sampling.

use gwp_common::{BoundingBox, Coordinate, GwpClass};
use gwp_engine::{predict, xai, FeatureSampler, GwpRaster};
use test_utils::{assert_approx_eq, banded_overlay, encode_png, write_overlay};

fn banded_sampler() -> FeatureSampler {
    let dir = tempfile::tempdir().unwrap();
    let path = write_overlay(dir.path(), &banded_overlay(30, 30));
    let bytes = std::fs::read(&path).unwrap();
    let raster = GwpRaster::from_bytes(&bytes, BoundingBox::DHARWAD)
        .unwrap()
        .with_path(&path);
    assert_eq!(raster.path(), Some(path.as_path()));
    FeatureSampler::new("Dharwad", BoundingBox::DHARWAD, Some(raster))
}

#[test]
fn test_garbage_bytes_fail() {
    assert!(GwpRaster::from_bytes(b"not a png", BoundingBox::DHARWAD).is_err());
}

#[test]
fn test_from_bytes_dimensions() {
    let bytes = encode_png(&banded_overlay(12, 12));
    let raster = GwpRaster::from_bytes(&bytes, BoundingBox::DHARWAD).unwrap();
    assert_eq!((raster.width(), raster.height()), (12, 12));
}

#[test]
fn test_bands_map_to_classes() {
    let sampler = banded_sampler();
    assert!(sampler.is_map_backed());

    assert_eq!(sampler.class_at(Coordinate::new(15.9, 75.0)), GwpClass::High);
    assert_eq!(sampler.class_at(Coordinate::new(15.5, 75.0)), GwpClass::Moderate);
    assert_eq!(sampler.class_at(Coordinate::new(15.1, 75.0)), GwpClass::Low);
}

#[test]
fn test_statistics_from_overlay() {
    let stats = predict::district_statistics(&banded_sampler());
    let d = stats.gwp_distribution;
    assert_approx_eq!(d.high, 33.3, 0.05);
    assert_approx_eq!(d.moderate, 33.3, 0.05);
    assert_approx_eq!(d.low, 33.3, 0.05);
    assert_eq!(stats.data_source.as_deref(), Some("Actual GWP map"));
}

#[test]
fn test_explanation_follows_sampled_class() {
    let sampler = banded_sampler();
    let site = sampler.sample(Coordinate::new(15.9, 75.0));
    let explanation = xai::explain(&site);

    assert_eq!(explanation.prediction, GwpClass::High);
    assert_eq!(explanation.reasoning_chain.len(), 3);
    assert!((0.0..=1.0).contains(&explanation.confidence));
}
