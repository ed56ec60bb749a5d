//! Web Mercator slippy-map tile coordinates and pixel mapping.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Tile edge length in pixels.
pub const TILE_SIZE: u32 = 256;

/// A tile coordinate (z/x/y) under the standard Web Mercator tiling scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// A pixel position within a 256x256 tile, each axis in [0,255].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelOffset {
    pub px: u32,
    pub py: u32,
}

/// Map a geographic point to its tile coordinate and pixel offset at `zoom`.
///
/// Standard slippy-map math: `n = 2^zoom` tiles per axis, x from linear
/// longitude, y from the Mercator vertical transform. The pixel offset is the
/// fractional remainder of the same formulas scaled by the tile size.
///
/// Undefined beyond ~85.05 degrees latitude; Japan's extent never approaches
/// that, and callers validate range before reaching this function.
pub fn to_tile_pixel(point: &GeoPoint, zoom: u32) -> (TileCoord, PixelOffset) {
    let n = 2u32.pow(zoom) as f64;
    let lat_rad = point.lat.to_radians();

    let x_frac = n * (point.lon + 180.0) / 360.0;
    let y_frac = n * (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0;

    let x = x_frac.floor();
    let y = y_frac.floor();

    let px = (TILE_SIZE as f64 * (x_frac - x)) as u32;
    let py = (TILE_SIZE as f64 * (y_frac - y)) as u32;

    (
        TileCoord::new(zoom, x as u32, y as u32),
        PixelOffset { px, py },
    )
}
