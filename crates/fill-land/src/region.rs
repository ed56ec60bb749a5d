//! Region-code resolution boundary.
//!
//! The polygon dataset is partitioned by administrative region code. Mapping
//! a coordinate to its region is reverse geocoding, an external collaborator;
//! the engine depends on it only through this trait.

use async_trait::async_trait;

use hazard_common::{GeoPoint, HazardResult};

/// Resolves the administrative region code a point falls in.
#[async_trait]
pub trait RegionResolver: Send + Sync {
    /// Region code for `point` (two-digit prefecture code, zero-padded).
    async fn region_code(&self, point: &GeoPoint) -> HazardResult<String>;
}

/// Resolver that always returns one fixed region code.
///
/// Useful in tests and in deployments scoped to a single prefecture.
pub struct StaticRegionResolver {
    code: String,
}

impl StaticRegionResolver {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[async_trait]
impl RegionResolver for StaticRegionResolver {
    async fn region_code(&self, _point: &GeoPoint) -> HazardResult<String> {
        Ok(self.code.clone())
    }
}
