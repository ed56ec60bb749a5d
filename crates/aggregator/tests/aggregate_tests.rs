//! End-to-end aggregation over fake upstream sources.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use aggregator::{AggregatorConfig, HazardAggregator};
use fill_land::{FillLandSource, MemoryPolygonStore, StaticRegionResolver};
use hazard_common::{GeoPoint, HazardError, HazardResult};
use jshis::{IntensityThreshold, ProbabilityReading, ProbabilitySource};
use test_utils::{coords, solid_tile_png, square_feature_collection, transparent_tile_png};
use tile_sampler::TileFetcher;

/// Serves a solid severe tile for the flood layer, transparent elsewhere.
struct LayeredFetcher;

#[async_trait]
impl TileFetcher for LayeredFetcher {
    async fn fetch_tile(&self, url: &str) -> HazardResult<Bytes> {
        if url.contains("01_flood_l2_shinsuishin_data") {
            Ok(solid_tile_png([255, 145, 145, 255]))
        } else {
            Ok(transparent_tile_png())
        }
    }
}

/// Refuses every tile fetch.
struct DeadFetcher;

#[async_trait]
impl TileFetcher for DeadFetcher {
    async fn fetch_tile(&self, url: &str) -> HazardResult<Bytes> {
        Err(HazardError::UpstreamStatus {
            status: 503,
            url: url.to_string(),
        })
    }
}

/// Fixed probabilities per threshold.
struct StaticProbability {
    p50: ProbabilityReading,
    p60: ProbabilityReading,
}

#[async_trait]
impl ProbabilitySource for StaticProbability {
    async fn query_probability(
        &self,
        _point: &GeoPoint,
        threshold: IntensityThreshold,
    ) -> ProbabilityReading {
        match threshold {
            IntensityThreshold::Intensity50Plus => self.p50,
            IntensityThreshold::Intensity60Plus => self.p60,
        }
    }
}

/// Probability source that never answers within a short deadline.
struct SlowProbability;

#[async_trait]
impl ProbabilitySource for SlowProbability {
    async fn query_probability(
        &self,
        _point: &GeoPoint,
        _threshold: IntensityThreshold,
    ) -> ProbabilityReading {
        tokio::time::sleep(Duration::from_secs(5)).await;
        ProbabilityReading::Value(0.5)
    }
}

fn fill_land_around(center: GeoPoint) -> FillLandSource {
    let store = MemoryPolygonStore::new().with_region(
        "13",
        Bytes::from(square_feature_collection(center, 0.01)),
    );
    FillLandSource::new(Arc::new(store), Arc::new(StaticRegionResolver::new("13")))
}

#[tokio::test]
async fn test_full_report() {
    let aggregator = HazardAggregator::new(
        Arc::new(LayeredFetcher),
        Arc::new(StaticProbability {
            p50: ProbabilityReading::Value(0.853),
            p60: ProbabilityReading::Value(0.12),
        }),
        fill_land_around(coords::TOKYO_TOWER),
        AggregatorConfig::default(),
    );

    let report = aggregator.aggregate(coords::TOKYO_TOWER).await;

    // Flood layer is uniformly the 5m band; everything else is clear
    assert_eq!(report.inundation_depth.max.description, "5m以上10m未満");
    assert_eq!(report.inundation_depth.center.description, "5m以上10m未満");
    assert_eq!(report.tsunami_inundation.max.description, "浸水想定なし");
    assert_eq!(report.hightide_inundation.max.description, "浸水想定なし");
    assert_eq!(report.landslide_hazard.debris_flow.max.description, "該当なし");
    assert_eq!(report.landslide_hazard.steep_slope.max.description, "該当なし");
    assert_eq!(report.landslide_hazard.landslide.max.description, "該当なし");

    assert_eq!(report.large_fill_land.max.description, "あり");

    assert_eq!(report.jshis_prob_50.max, ProbabilityReading::Value(0.853));
    assert_eq!(report.jshis_prob_50.max.format_percent(), "85%");
    assert_eq!(report.jshis_prob_60.center, ProbabilityReading::Value(0.12));
}

#[tokio::test]
async fn test_report_serializes_to_api_shape() {
    let aggregator = HazardAggregator::new(
        Arc::new(LayeredFetcher),
        Arc::new(StaticProbability {
            p50: ProbabilityReading::Value(0.853),
            p60: ProbabilityReading::NoData,
        }),
        fill_land_around(coords::TOKYO_TOWER),
        AggregatorConfig::default(),
    );

    let report = aggregator.aggregate(coords::TOKYO_TOWER).await;
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["inundation_depth"]["max_info"], "5m以上10m未満");
    assert_eq!(json["jshis_prob_50"]["max_prob"], 0.853);
    assert!(json["jshis_prob_60"]["max_prob"].is_null());
    assert_eq!(json["large_fill_land"]["max_info"], "あり");
    assert_eq!(
        json["landslide_hazard"]["steep_slope"]["center_info"],
        "該当なし"
    );
}

#[tokio::test]
async fn test_dead_upstreams_degrade_per_field() {
    let aggregator = HazardAggregator::new(
        Arc::new(DeadFetcher),
        Arc::new(StaticProbability {
            p50: ProbabilityReading::NoData,
            p60: ProbabilityReading::NoData,
        }),
        fill_land_around(coords::OSAKA_CASTLE),
        AggregatorConfig::default(),
    );

    let report = aggregator.aggregate(coords::OSAKA_CASTLE).await;

    // Every tile layer reports no-data, never a silent "no risk"
    assert_eq!(report.inundation_depth.max.description, "データなし");
    assert!(report.inundation_depth.max.is_sentinel());
    assert_eq!(report.tsunami_inundation.center.description, "データなし");

    assert_eq!(report.jshis_prob_50.max, ProbabilityReading::NoData);

    // The polygon layer is independent of tile transport and still answers
    assert_eq!(report.large_fill_land.max.description, "あり");
}

#[tokio::test]
async fn test_deadline_degrades_to_sentinel() {
    let config = AggregatorConfig {
        hazard_deadline: Duration::from_millis(50),
        ..Default::default()
    };
    let aggregator = HazardAggregator::new(
        Arc::new(LayeredFetcher),
        Arc::new(SlowProbability),
        fill_land_around(coords::TOKYO_TOWER),
        config,
    );

    let report = aggregator.aggregate(coords::TOKYO_TOWER).await;

    // The slow probability source is cut off; tile layers still complete
    assert_eq!(report.jshis_prob_50.max, ProbabilityReading::NoData);
    assert_eq!(report.jshis_prob_60.max, ProbabilityReading::NoData);
    assert_eq!(report.inundation_depth.max.description, "5m以上10m未満");
}
