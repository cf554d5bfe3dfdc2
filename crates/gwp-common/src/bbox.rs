//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in degrees.
///
/// `x` is longitude and `y` is latitude. All edges are inclusive, so a point
/// lying exactly on the border counts as inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Dharwad district, Karnataka.
    pub const DHARWAD: BoundingBox = BoundingBox {
        min_x: 74.5,
        min_y: 15.0,
        max_x: 75.5,
        max_y: 16.0,
    };

    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse a "minx,miny,maxx,maxy" string.
    pub fn from_csv(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |p: &str| {
            p.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(p.to_string()))
        };

        let bbox = Self::new(
            parse(parts[0])?,
            parse(parts[1])?,
            parse(parts[2])?,
            parse(parts[3])?,
        );

        if bbox.min_x >= bbox.max_x || bbox.min_y >= bbox.max_y {
            return Err(BboxParseError::Degenerate(s.to_string()));
        }

        Ok(bbox)
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Check if a lat/lon pair falls inside the box.
    pub fn contains_lat_lon(&self, lat: f64, lon: f64) -> bool {
        self.contains_point(lon, lat)
    }

    /// Centre as `[lat, lon]`.
    pub fn center(&self) -> [f64; 2] {
        [
            (self.min_y + self.max_y) / 2.0,
            (self.min_x + self.max_x) / 2.0,
        ]
    }

    /// Corner pair in the `[[south, west], [north, east]]` order web maps expect.
    pub fn to_leaflet_bounds(&self) -> [[f64; 2]; 2] {
        [[self.min_y, self.min_x], [self.max_y, self.max_x]]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::DHARWAD
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bounds format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in bounds: {0}")]
    InvalidNumber(String),

    #[error("Bounds have no area: {0}")]
    Degenerate(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_bbox() {
        let bbox = BoundingBox::from_csv("74.5, 15.0, 75.5, 16.0").unwrap();
        assert_eq!(bbox, BoundingBox::DHARWAD);
    }

    #[test]
    fn test_degenerate_rejected() {
        assert!(matches!(
            BoundingBox::from_csv("75.5,15.0,74.5,16.0"),
            Err(BboxParseError::Degenerate(_))
        ));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let bbox = BoundingBox::DHARWAD;
        assert!(bbox.contains_lat_lon(15.0, 74.5));
        assert!(bbox.contains_lat_lon(16.0, 75.5));
        assert!(!bbox.contains_lat_lon(16.0001, 75.0));
    }
}
