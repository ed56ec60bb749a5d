//! The generic tile-sampling routine: one layer, one sample set, one
//! (max, center) result.

use std::collections::HashSet;

use tracing::{debug, instrument};

use hazard_common::{reduce_readings, to_tile_pixel, HazardTypeResult, SampleSet, SeverityReading};

use crate::classify::classify_pixel;
use crate::config::HazardLayerConfig;
use crate::fetch::{fetch_tiles, TileFetcher};

/// Sample one tile-based hazard layer across a sample set.
///
/// Each sample point maps to a (tile, pixel) pair; unique tiles are fetched
/// once, concurrently. Points whose tile is absent contribute no reading, so
/// a total fetch failure reduces to the no-data sentinel instead of
/// reporting "no risk".
#[instrument(skip(fetcher, layer, samples), fields(layer = layer.name))]
pub async fn sample_layer(
    fetcher: &dyn TileFetcher,
    layer: &HazardLayerConfig,
    samples: &SampleSet,
    fetch_concurrency: usize,
) -> HazardTypeResult {
    let mapped: Vec<_> = samples
        .iter()
        .map(|point| to_tile_pixel(point, layer.zoom))
        .collect();

    let unique: HashSet<_> = mapped.iter().map(|(coord, _)| *coord).collect();
    let tiles = fetch_tiles(fetcher, layer, &unique, fetch_concurrency).await;

    // Readings stay indexed by sample position: the reduction's first-wins
    // tie-break requires the stable center-first traversal order.
    let readings: Vec<Option<SeverityReading>> = mapped
        .iter()
        .map(|(coord, offset)| {
            tiles
                .get(coord)
                .and_then(|img| img.as_ref())
                .map(|img| classify_pixel(img, *offset, &layer.color_table, layer.no_risk_label))
        })
        .collect();

    let result = reduce_readings(&readings);
    debug!(
        max = %result.max.description,
        center = %result.center.description,
        "Layer sampled"
    );
    result
}
