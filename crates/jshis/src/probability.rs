//! Probability readings, formatting, and the (max, center) reduction.

use futures::stream::{self, StreamExt};
use serde::{Serialize, Serializer};

use hazard_common::{severity::labels, GeoPoint, SampleSet};

use crate::client::ProbabilitySource;

/// Named intensity thresholds the mesh API is queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityThreshold {
    /// Seismic intensity 5-upper or greater
    Intensity50Plus,
    /// Seismic intensity 6-upper or greater
    Intensity60Plus,
}

impl IntensityThreshold {
    /// Property name carrying this threshold's probability in the response.
    pub fn property_key(&self) -> &'static str {
        match self {
            IntensityThreshold::Intensity50Plus => "T30_I50_PS",
            IntensityThreshold::Intensity60Plus => "T30_I60_PS",
        }
    }
}

/// One point's probability reading.
///
/// Absence (fetch or schema failure) is distinguished from a true probability
/// of zero, and from a value that was present but unparseable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbabilityReading {
    /// 30-year occurrence probability in [0,1]
    Value(f64),
    /// Field present upstream but not a number
    ParseFailed,
    /// No value could be obtained for this point
    NoData,
}

impl ProbabilityReading {
    /// Human-readable percentage: `floor(p * 100)` percent.
    pub fn format_percent(&self) -> String {
        match self {
            ProbabilityReading::Value(p) => format!("{}%", (p * 100.0).floor() as i64),
            ProbabilityReading::ParseFailed => labels::PARSE_FAILED.to_string(),
            ProbabilityReading::NoData => labels::NO_DATA.to_string(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            ProbabilityReading::Value(p) => Some(*p),
            _ => None,
        }
    }
}

// External consumers see a number or null; the failure distinction only
// surfaces through the formatted percentage.
impl Serialize for ProbabilityReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProbabilityReading::Value(p) => serializer.serialize_f64(*p),
            _ => serializer.serialize_none(),
        }
    }
}

/// The probability engine's output per threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbabilityResult {
    #[serde(rename = "max_prob")]
    pub max: ProbabilityReading,
    #[serde(rename = "center_prob")]
    pub center: ProbabilityReading,
}

impl ProbabilityResult {
    pub fn no_data() -> Self {
        Self {
            max: ProbabilityReading::NoData,
            center: ProbabilityReading::NoData,
        }
    }
}

/// Reduce per-point readings to (max, center).
///
/// Only numeric values compete for the max; the comparison is strictly
/// greater, so the first point encountered in sample order wins ties. If no
/// point produced a value the max is NoData, never zero.
pub fn reduce_probabilities(readings: &[ProbabilityReading]) -> ProbabilityResult {
    let mut max: Option<f64> = None;

    for reading in readings {
        if let ProbabilityReading::Value(p) = reading {
            match max {
                Some(current) if *p <= current => {}
                _ => max = Some(*p),
            }
        }
    }

    ProbabilityResult {
        max: max.map_or(ProbabilityReading::NoData, ProbabilityReading::Value),
        center: readings
            .first()
            .copied()
            .unwrap_or(ProbabilityReading::NoData),
    }
}

/// Query one threshold across a whole sample set and reduce.
///
/// Queries run concurrently but `buffered` preserves sample order, which the
/// center-first reduction depends on.
pub async fn sample_threshold(
    source: &dyn ProbabilitySource,
    samples: &SampleSet,
    threshold: IntensityThreshold,
    concurrency: usize,
) -> ProbabilityResult {
    let readings: Vec<ProbabilityReading> = stream::iter(samples.iter())
        .map(|point: &GeoPoint| source.query_probability(point, threshold))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    reduce_probabilities(&readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_floor() {
        assert_eq!(ProbabilityReading::Value(0.853).format_percent(), "85%");
        assert_eq!(ProbabilityReading::Value(0.0).format_percent(), "0%");
        assert_eq!(ProbabilityReading::Value(1.0).format_percent(), "100%");
    }

    #[test]
    fn test_format_failures_are_distinct() {
        assert_eq!(ProbabilityReading::NoData.format_percent(), "データなし");
        assert_eq!(
            ProbabilityReading::ParseFailed.format_percent(),
            "データ解析失敗"
        );
    }

    #[test]
    fn test_reduce_max_and_center() {
        let readings = vec![
            ProbabilityReading::Value(0.1),
            ProbabilityReading::Value(0.8),
            ProbabilityReading::Value(0.3),
        ];
        let result = reduce_probabilities(&readings);

        assert_eq!(result.max, ProbabilityReading::Value(0.8));
        assert_eq!(result.center, ProbabilityReading::Value(0.1));
    }

    #[test]
    fn test_reduce_zero_beats_absence() {
        // A true probability of 0 is a value, not missing data
        let readings = vec![ProbabilityReading::Value(0.0), ProbabilityReading::NoData];
        let result = reduce_probabilities(&readings);

        assert_eq!(result.max, ProbabilityReading::Value(0.0));
    }

    #[test]
    fn test_reduce_all_absent() {
        let readings = vec![ProbabilityReading::NoData; 9];
        let result = reduce_probabilities(&readings);

        assert_eq!(result.max, ProbabilityReading::NoData);
        assert_eq!(result.center, ProbabilityReading::NoData);
    }

    #[test]
    fn test_serialize_value_or_null() {
        let result = ProbabilityResult {
            max: ProbabilityReading::Value(0.853),
            center: ProbabilityReading::NoData,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["max_prob"], 0.853);
        assert!(json["center_prob"].is_null());
    }

    #[tokio::test]
    async fn test_sample_threshold_preserves_center_order() {
        use async_trait::async_trait;

        // Probability grows with longitude, so the center (first sample) is
        // never the max but must still land in the center slot.
        struct LonSource;

        #[async_trait]
        impl ProbabilitySource for LonSource {
            async fn query_probability(
                &self,
                point: &GeoPoint,
                _threshold: IntensityThreshold,
            ) -> ProbabilityReading {
                ProbabilityReading::Value((point.lon - 139.0).abs())
            }
        }

        let samples = hazard_common::sample_ring(
            test_utils::coords::TOKYO_TOWER,
            100.0,
            8,
        );
        let result =
            sample_threshold(&LonSource, &samples, IntensityThreshold::Intensity50Plus, 4).await;

        let center_expected = (samples[0].lon - 139.0).abs();
        assert_eq!(result.center, ProbabilityReading::Value(center_expected));
        assert!(result.max.value().unwrap() > center_expected);
    }

    #[test]
    fn test_property_keys() {
        assert_eq!(
            IntensityThreshold::Intensity50Plus.property_key(),
            "T30_I50_PS"
        );
        assert_eq!(
            IntensityThreshold::Intensity60Plus.property_key(),
            "T30_I60_PS"
        );
    }
}
