//! Geographic point type and extent helpers.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Japan's coordinate extent as (lat_min, lat_max, lon_min, lon_max).
///
/// Callers validate query points against this range before sampling; the
/// engine itself does not re-check it.
pub const JAPAN_EXTENT: (f64, f64, f64, f64) = (24.0, 46.0, 123.0, 146.0);

/// Check whether a point falls within Japan's extent.
pub fn within_japan(point: &GeoPoint) -> bool {
    let (lat_min, lat_max, lon_min, lon_max) = JAPAN_EXTENT;
    point.lat >= lat_min && point.lat <= lat_max && point.lon >= lon_min && point.lon <= lon_max
}
