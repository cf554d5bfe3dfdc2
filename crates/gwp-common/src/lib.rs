//! Common types and utilities shared across the groundwater potential services.

pub mod bbox;
pub mod class;
pub mod error;
pub mod geo;

pub use bbox::BoundingBox;
pub use class::{GwpClass, Impact};
pub use error::{GwpError, GwpResult};
pub use geo::{haversine_km, location_seed, round_to, Coordinate};
