//! Groundwater Potential Engine
//!
//! Turns a coordinate into a groundwater potential (GWP) class, the spectral
//! and terrain indices behind it, and an explanation of why the class was
//! assigned. Every analysis endpoint of the service is a pure function in this
//! crate so it can be exercised without HTTP.
//!
//! # Architecture
//!
//! ```text
//! Coordinate
//!      │
//!      ▼
//! FeatureSampler::sample(coord)
//!      │
//!      ├─► GwpRaster loaded? ── yes ─► pixel colour → class
//!      │                               └─► class baselines + seeded jitter
//!      │
//!      └─► no ─► seeded simulated indices → weighted score → class
//!               │
//!               ▼
//!          SiteFeatures { ndvi, ndwi, dem, class }
//!               │
//!               ├─► xai::explain()        feature attribution, reasoning chain
//!               ├─► predict::*            batch, comparison, statistics
//!               └─► analysis::*           borewell, recharge, drought, ...
//! ```
//!
//! # Example
//!
//! ```rust
//! use gwp_common::{BoundingBox, Coordinate};
//! use gwp_engine::{xai, FeatureSampler};
//!
//! let sampler = FeatureSampler::simulated("Dharwad", BoundingBox::DHARWAD);
//! let site = sampler.sample(Coordinate::new(15.45, 75.01));
//! let explanation = xai::explain(&site);
//! assert_eq!(explanation.prediction, site.gwp_class);
//! ```

pub mod analysis;
pub mod explain;
pub mod predict;
pub mod raster;
pub mod sampler;
pub mod xai;

pub use raster::{ClassShares, GwpRaster};
pub use sampler::{FeatureSampler, SiteFeatures};
