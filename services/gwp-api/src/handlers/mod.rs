//! HTTP request handlers.

pub mod advanced;
pub mod health;
pub mod predict;
pub mod system;

pub use advanced::*;
pub use health::*;
pub use predict::*;
pub use system::*;

use chrono::{SecondsFormat, Utc};
use gwp_common::{location_seed, Coordinate};
use gwp_engine::{FeatureSampler, SiteFeatures};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::ApiResult;

/// Response timestamp, UTC with microseconds.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn count_request(endpoint: &'static str) {
    metrics::counter!("gwp_requests_total", "endpoint" => endpoint).increment(1);
}

/// Sample features at `at`, rejecting coordinates outside the district.
pub(crate) fn locate(sampler: &FeatureSampler, at: Coordinate) -> ApiResult<SiteFeatures> {
    sampler.require_inside(at)?;
    Ok(sampler.sample(at))
}

/// Per-location RNG for the synthetic analyses, so repeated queries agree.
///
/// `salt` keeps analyses at the same point from sharing one stream.
pub(crate) fn analysis_rng(at: Coordinate, salt: u64) -> StdRng {
    StdRng::seed_from_u64(location_seed(at.lat, at.lon) ^ salt.rotate_left(32))
}
