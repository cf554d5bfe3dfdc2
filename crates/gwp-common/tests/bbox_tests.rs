//! Tests for BoundingBox and distance helpers.

use gwp_common::bbox::{BboxParseError, BoundingBox};
use gwp_common::{haversine_km, Coordinate};

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(74.5, 15.0, 75.5, 16.0);
    assert_eq!(bbox, BoundingBox::DHARWAD);
    assert_eq!(BoundingBox::default(), BoundingBox::DHARWAD);
}

#[test]
fn test_bbox_dimensions() {
    let bbox = BoundingBox::new(0.0, 0.0, 2.0, 0.5);
    assert_eq!(bbox.width(), 2.0);
    assert_eq!(bbox.height(), 0.5);
}

// ============================================================================
// Parsing tests
// ============================================================================

#[test]
fn test_parse_invalid_format_too_few() {
    let result = BoundingBox::from_csv("0,0,100");
    assert!(matches!(result, Err(BboxParseError::InvalidFormat(_))));
}

#[test]
fn test_parse_invalid_number() {
    let result = BoundingBox::from_csv("0,abc,100,100");
    assert!(matches!(result, Err(BboxParseError::InvalidNumber(_))));
}

// ============================================================================
// Containment tests
// ============================================================================

#[test]
fn test_district_contains_city() {
    // Dharwad city
    assert!(BoundingBox::DHARWAD.contains_lat_lon(15.4589, 75.0078));
}

#[test]
fn test_district_excludes_bangalore() {
    assert!(!BoundingBox::DHARWAD.contains_lat_lon(12.9716, 77.5946));
}

#[test]
fn test_lat_lon_order_matters() {
    // Swapped arguments land far outside the district.
    assert!(!BoundingBox::DHARWAD.contains_lat_lon(75.0, 15.5));
}

#[test]
fn test_center_and_leaflet_bounds() {
    let bbox = BoundingBox::DHARWAD;
    assert_eq!(bbox.center(), [15.5, 75.0]);
    assert_eq!(bbox.to_leaflet_bounds(), [[15.0, 74.5], [16.0, 75.5]]);
}

// ============================================================================
// Distance tests
// ============================================================================

#[test]
fn test_haversine_symmetric() {
    let a = Coordinate::new(15.4589, 75.0078);
    let b = Coordinate::new(15.4534, 75.0267);
    let ab = haversine_km(a, b);
    let ba = haversine_km(b, a);
    assert!((ab - ba).abs() < 1e-12);
    assert!(ab > 1.5 && ab < 2.5, "got {}", ab);
}
