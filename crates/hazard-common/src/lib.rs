//! Common types and utilities shared across all hazard-sampling crates.

pub mod error;
pub mod geo;
pub mod sample;
pub mod severity;
pub mod tile;

pub use error::{HazardError, HazardResult};
pub use geo::{GeoPoint, JAPAN_EXTENT};
pub use sample::{sample_ring, SampleSet};
pub use severity::{reduce_readings, ColorTable, HazardTypeResult, SeverityReading};
pub use tile::{to_tile_pixel, PixelOffset, TileCoord, TILE_SIZE};
