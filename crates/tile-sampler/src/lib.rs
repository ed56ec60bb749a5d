//! Raster tile sampling: fetch hazard-layer tiles, classify pixels, and
//! reduce a sample set to a (max, center) severity pair.

pub mod classify;
pub mod config;
pub mod fetch;
pub mod sample;

pub use classify::classify_pixel;
pub use config::{HazardLayerConfig, TileSamplerConfig};
pub use fetch::{HttpTileFetcher, TileFetcher};
pub use sample::sample_layer;
