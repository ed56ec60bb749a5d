//! The aggregated per-query hazard report.

use serde::Serialize;

use hazard_common::HazardTypeResult;
use jshis::ProbabilityResult;

/// The three landslide sub-types, kept distinct by the engine.
///
/// Consumers may collapse them into one combined description; the report
/// itself never does.
#[derive(Debug, Clone, Serialize)]
pub struct LandslideGroup {
    pub debris_flow: HazardTypeResult,
    pub steep_slope: HazardTypeResult,
    pub landslide: HazardTypeResult,
}

/// Every hazard type's (max, center) summary for one query coordinate.
///
/// Serializes to the external API shape: `max_info`/`center_info` for
/// classified layers, `max_prob`/`center_prob` for probability layers.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedReport {
    /// 30-year probability of seismic intensity 5-upper or greater
    pub jshis_prob_50: ProbabilityResult,
    /// 30-year probability of seismic intensity 6-upper or greater
    pub jshis_prob_60: ProbabilityResult,
    /// Expected maximum flood inundation depth
    pub inundation_depth: HazardTypeResult,
    /// Expected tsunami inundation
    pub tsunami_inundation: HazardTypeResult,
    /// Expected high-tide inundation
    pub hightide_inundation: HazardTypeResult,
    /// Large-scale fill land presence
    pub large_fill_land: HazardTypeResult,
    /// Landslide warning zones, three independent sub-types
    pub landslide_hazard: LandslideGroup,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazard_common::SeverityReading;
    use jshis::ProbabilityReading;

    #[test]
    fn test_report_serialization_shape() {
        let tile = HazardTypeResult {
            max: SeverityReading::new("5m以上10m未満", 5.0),
            center: SeverityReading::no_risk("浸水なし"),
        };
        let report = AggregatedReport {
            jshis_prob_50: ProbabilityResult {
                max: ProbabilityReading::Value(0.853),
                center: ProbabilityReading::Value(0.85),
            },
            jshis_prob_60: ProbabilityResult::no_data(),
            inundation_depth: tile.clone(),
            tsunami_inundation: tile.clone(),
            hightide_inundation: tile.clone(),
            large_fill_land: HazardTypeResult::no_data(),
            landslide_hazard: LandslideGroup {
                debris_flow: tile.clone(),
                steep_slope: tile.clone(),
                landslide: tile,
            },
        };

        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["jshis_prob_50"]["max_prob"], 0.853);
        assert!(json["jshis_prob_60"]["center_prob"].is_null());
        assert_eq!(json["inundation_depth"]["max_info"], "5m以上10m未満");
        assert_eq!(json["inundation_depth"]["center_info"], "浸水なし");
        assert_eq!(
            json["landslide_hazard"]["debris_flow"]["max_info"],
            "5m以上10m未満"
        );
        assert_eq!(json["large_fill_land"]["max_info"], "データなし");
    }
}
