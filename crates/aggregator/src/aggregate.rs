//! Fan-out orchestration across all hazard sources.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use fill_land::FillLandSource;
use hazard_common::{sample_ring, GeoPoint, HazardTypeResult};
use jshis::{sample_threshold, IntensityThreshold, ProbabilityResult, ProbabilitySource};
use tile_sampler::{sample_layer, HazardLayerConfig, TileFetcher};

use crate::layers;
use crate::report::{AggregatedReport, LandslideGroup};

/// Tuning knobs for one aggregation call.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Sampling radius in meters
    pub radius_m: f64,
    /// Number of perimeter points on the sampling ring
    pub ring_points: usize,
    /// How many hazard evaluations may run at once (upstream rate limits)
    pub max_concurrent_hazards: usize,
    /// Hard deadline per hazard evaluation; a cut-off evaluation degrades to
    /// its failure sentinel instead of erroring the whole report
    pub hazard_deadline: Duration,
    /// Concurrent tile fetches within one layer
    pub tile_fetch_concurrency: usize,
    /// Concurrent mesh queries within one threshold
    pub probability_concurrency: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            radius_m: 100.0,
            ring_points: 8,
            max_concurrent_hazards: 4,
            hazard_deadline: Duration::from_secs(60),
            tile_fetch_concurrency: 4,
            probability_concurrency: 4,
        }
    }
}

/// Orchestrates every hazard source over one shared sample set and reduces
/// each to its (max, center) summary.
///
/// Best-effort completeness: no single tile, point, or hazard failure ever
/// prevents the report from being produced.
pub struct HazardAggregator {
    tiles: Arc<dyn TileFetcher>,
    probability: Arc<dyn ProbabilitySource>,
    fill_land: FillLandSource,
    config: AggregatorConfig,
}

impl HazardAggregator {
    pub fn new(
        tiles: Arc<dyn TileFetcher>,
        probability: Arc<dyn ProbabilitySource>,
        fill_land: FillLandSource,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            tiles,
            probability,
            fill_land,
            config,
        }
    }

    /// Produce the full report for one query coordinate.
    ///
    /// The sample set is computed once and shared by every hazard type; the
    /// evaluations themselves are independent and run concurrently under the
    /// configured bound.
    #[instrument(skip(self), fields(lat = query.lat, lon = query.lon))]
    pub async fn aggregate(&self, query: GeoPoint) -> AggregatedReport {
        let samples = sample_ring(query, self.config.radius_m, self.config.ring_points);
        let semaphore = Semaphore::new(self.config.max_concurrent_hazards);

        let run_tile = |layer: HazardLayerConfig| {
            let samples = &samples;
            let semaphore = &semaphore;
            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return HazardTypeResult::processing_failed(),
                };
                let fut = sample_layer(
                    self.tiles.as_ref(),
                    &layer,
                    samples,
                    self.config.tile_fetch_concurrency,
                );
                match timeout(self.config.hazard_deadline, fut).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(layer = layer.name, "Hazard evaluation timed out");
                        HazardTypeResult::processing_failed()
                    }
                }
            }
        };

        let run_probability = |threshold: IntensityThreshold| {
            let samples = &samples;
            let semaphore = &semaphore;
            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return ProbabilityResult::no_data(),
                };
                let fut = sample_threshold(
                    self.probability.as_ref(),
                    samples,
                    threshold,
                    self.config.probability_concurrency,
                );
                match timeout(self.config.hazard_deadline, fut).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(threshold = threshold.property_key(), "Probability query timed out");
                        ProbabilityResult::no_data()
                    }
                }
            }
        };

        let run_fill_land = {
            let samples = &samples;
            let semaphore = &semaphore;
            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return HazardTypeResult::processing_failed(),
                };
                match timeout(self.config.hazard_deadline, self.fill_land.evaluate(samples)).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("Fill land evaluation timed out");
                        HazardTypeResult::processing_failed()
                    }
                }
            }
        };

        let (
            jshis_prob_50,
            jshis_prob_60,
            inundation_depth,
            tsunami_inundation,
            hightide_inundation,
            large_fill_land,
            debris_flow,
            steep_slope,
            landslide,
        ) = tokio::join!(
            run_probability(IntensityThreshold::Intensity50Plus),
            run_probability(IntensityThreshold::Intensity60Plus),
            run_tile(layers::inundation_depth()),
            run_tile(layers::tsunami_inundation()),
            run_tile(layers::hightide_inundation()),
            run_fill_land,
            run_tile(layers::debris_flow()),
            run_tile(layers::steep_slope()),
            run_tile(layers::landslide()),
        );

        info!("Aggregation complete");

        AggregatedReport {
            jshis_prob_50,
            jshis_prob_60,
            inundation_depth,
            tsunami_inundation,
            hightide_inundation,
            large_fill_land,
            landslide_hazard: LandslideGroup {
                debris_flow,
                steep_slope,
                landslide,
            },
        }
    }
}
