//! Configuration for tile fetching and per-hazard layer definitions.

use std::time::Duration;

use hazard_common::ColorTable;

/// Configuration for the HTTP tile fetcher.
#[derive(Debug, Clone)]
pub struct TileSamplerConfig {
    /// Per-tile request timeout
    pub request_timeout: Duration,
    /// Maximum concurrent tile fetches within one layer
    pub fetch_concurrency: usize,
}

impl Default for TileSamplerConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            fetch_concurrency: 4,
        }
    }
}

/// One tile-based hazard layer: where its raster lives and how its pixel
/// colors map to severity readings.
///
/// A single parameterized sampling routine consumes these records; each of
/// the published hazard layers is just a different configuration.
#[derive(Debug, Clone)]
pub struct HazardLayerConfig {
    /// Layer identifier, used for logging only
    pub name: &'static str,
    /// URL template with `{z}`, `{x}`, `{y}` placeholders
    pub tile_url_template: String,
    /// Fixed zoom level the layer is published at
    pub zoom: u32,
    /// Exact-RGB severity lookup
    pub color_table: ColorTable,
    /// Label reported when a pixel is transparent (no hazard mapped)
    pub no_risk_label: &'static str,
}

impl HazardLayerConfig {
    /// Substitute a tile coordinate into the URL template.
    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        self.tile_url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}
