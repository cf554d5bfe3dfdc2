//! Common test fixtures for the groundwater potential tests.

use std::path::PathBuf;

use serde_json::{json, Value};
use tempfile::TempDir;

/// Well-known coordinates as `(lat, lon)`.
pub mod points {
    /// Dharwad city centre
    pub const DHARWAD_CITY: (f64, f64) = (15.4589, 75.0078);

    /// Hubli, inside the district
    pub const HUBLI: (f64, f64) = (15.3647, 75.1240);

    /// District centre
    pub const CENTER: (f64, f64) = (15.5, 75.0);

    /// South-west corner of the district bounds
    pub const SOUTH_WEST_CORNER: (f64, f64) = (15.0, 74.5);

    /// Bengaluru, well outside the district
    pub const BENGALURU: (f64, f64) = (12.9716, 77.5946);
}

/// `{"lat": .., "lon": ..}` request body.
pub fn point_body(point: (f64, f64)) -> Value {
    json!({ "lat": point.0, "lon": point.1 })
}

/// `{"coordinates": [...]}` batch body.
pub fn batch_body(points: &[(f64, f64)]) -> Value {
    let coordinates: Vec<Value> = points.iter().map(|p| point_body(*p)).collect();
    json!({ "coordinates": coordinates })
}

/// `{"locations": [...]}` comparison body with generated names.
pub fn comparison_body(points: &[(f64, f64)]) -> Value {
    let locations: Vec<Value> = points
        .iter()
        .enumerate()
        .map(|(i, p)| json!({ "name": format!("Site {}", i + 1), "lat": p.0, "lon": p.1 }))
        .collect();
    json!({ "locations": locations })
}

/// A temporary directory holding a `gwp.yaml` with the given contents.
pub struct TempConfig {
    pub dir: TempDir,
    pub path: PathBuf,
}

/// Write `yaml` to a fresh temporary `gwp.yaml`.
pub fn temp_config(yaml: &str) -> TempConfig {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("gwp.yaml");
    std::fs::write(&path, yaml).expect("write config");
    TempConfig { dir, path }
}
