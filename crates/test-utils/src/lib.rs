//! Shared test utilities for the hazard-sampling workspace.
//!
//! Provides synthetic raster tiles, canned GeoJSON geometry, and fixed
//! coordinates so source crates can exercise fetch/classify/contain paths
//! without touching real upstream services.

pub mod fixtures;
pub mod tiles;

pub use fixtures::*;
pub use tiles::*;
