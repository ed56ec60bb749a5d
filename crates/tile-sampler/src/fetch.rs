//! Tile fetching with per-call deduplication.
//!
//! A failed tile is a partial failure: it is marked absent and the sample
//! points on it are excluded from classification, while the rest of the
//! layer's points still contribute. Single attempt per tile per call.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use image::RgbaImage;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use hazard_common::{HazardError, HazardResult, TileCoord};

use crate::config::{HazardLayerConfig, TileSamplerConfig};

/// Trait for sources that can fetch raw tile bytes.
#[async_trait]
pub trait TileFetcher: Send + Sync {
    /// Fetch the encoded tile image at `url`.
    async fn fetch_tile(&self, url: &str) -> HazardResult<Bytes>;
}

/// HTTP tile fetcher with a bounded per-request timeout.
pub struct HttpTileFetcher {
    client: Client,
}

impl HttpTileFetcher {
    pub fn new(config: &TileSamplerConfig) -> HazardResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| HazardError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl TileFetcher for HttpTileFetcher {
    #[instrument(skip(self))]
    async fn fetch_tile(&self, url: &str) -> HazardResult<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HazardError::FetchError(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HazardError::UpstreamStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| HazardError::FetchError(format!("{}: {}", url, e)))
    }
}

/// Fetch and decode each unique tile once, concurrently.
///
/// Returns a map from tile coordinate to its decoded RGBA image; tiles that
/// failed to fetch or decode are present with `None`.
pub async fn fetch_tiles(
    fetcher: &dyn TileFetcher,
    layer: &HazardLayerConfig,
    coords: &HashSet<TileCoord>,
    concurrency: usize,
) -> HashMap<TileCoord, Option<RgbaImage>> {
    let results: Vec<(TileCoord, Option<RgbaImage>)> = stream::iter(coords.iter().copied())
        .map(|coord| async move {
            let url = layer.tile_url(coord.z, coord.x, coord.y);
            let image = match fetcher.fetch_tile(&url).await {
                Ok(bytes) => decode_tile(&bytes)
                    .map_err(|e| {
                        warn!(layer = layer.name, tile = %coord, error = %e, "Tile decode failed");
                    })
                    .ok(),
                Err(e) => {
                    warn!(layer = layer.name, tile = %coord, error = %e, "Tile fetch failed");
                    None
                }
            };
            (coord, image)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    debug!(
        layer = layer.name,
        requested = coords.len(),
        fetched = results.iter().filter(|(_, img)| img.is_some()).count(),
        "Fetched tile set"
    );

    results.into_iter().collect()
}

/// Decode encoded tile bytes into an RGBA pixel grid.
fn decode_tile(bytes: &Bytes) -> HazardResult<RgbaImage> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| HazardError::DecodeError(e.to_string()))?;
    Ok(image.into_rgba8())
}
