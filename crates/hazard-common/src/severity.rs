//! Severity readings, color tables, and the (max, center) reduction.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Sentinel labels shared across hazard types.
pub mod labels {
    /// No informative sample could be obtained at all.
    pub const NO_DATA: &str = "データなし";
    /// A value was present upstream but could not be parsed.
    pub const PARSE_FAILED: &str = "データ解析失敗";
    /// A local processing step (pixel access, polygon load) failed.
    pub const PROCESSING_FAILED: &str = "処理失敗";
    /// Pixel was present but its color is not in the layer's table.
    pub const UNCLASSIFIED: &str = "情報なし";
}

/// A classified severity value for one sample point.
///
/// `weight` is a total-order proxy: −1.0 is the "could not classify" sentinel,
/// 0.0 means no risk detected, and positive values encode each hazard type's
/// severity ladder (e.g. flood depth bands from 0.2 to 20).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeverityReading {
    pub description: String,
    pub weight: f64,
}

impl SeverityReading {
    pub fn new(description: impl Into<String>, weight: f64) -> Self {
        Self {
            description: description.into(),
            weight,
        }
    }

    /// Weight-0 reading with the layer's no-risk label.
    pub fn no_risk(label: &str) -> Self {
        Self::new(label, 0.0)
    }

    /// Sentinel for an unrecognized but present pixel color.
    pub fn unclassified() -> Self {
        Self::new(labels::UNCLASSIFIED, -1.0)
    }

    /// Sentinel for a point where no sample could be obtained.
    pub fn no_data() -> Self {
        Self::new(labels::NO_DATA, -1.0)
    }

    /// Sentinel for a local processing failure.
    pub fn processing_failed() -> Self {
        Self::new(labels::PROCESSING_FAILED, -1.0)
    }

    /// Whether this reading carries the failure sentinel weight.
    pub fn is_sentinel(&self) -> bool {
        self.weight < 0.0
    }
}

/// Exact-RGB lookup table mapping tile pixel colors to severity readings.
///
/// Alpha handling lives in the classifier, not here: a fully transparent pixel
/// is "no risk" unless its RGB matches a table entry (the table wins; in
/// practice all published entries are opaque).
#[derive(Debug, Clone)]
pub struct ColorTable {
    entries: HashMap<(u8, u8, u8), SeverityReading>,
}

impl ColorTable {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ((u8, u8, u8), &'static str, f64)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(rgb, desc, weight)| (rgb, SeverityReading::new(desc, weight)))
                .collect(),
        }
    }

    pub fn lookup(&self, rgb: (u8, u8, u8)) -> Option<&SeverityReading> {
        self.entries.get(&rgb)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The engine's output unit per hazard type: worst reading within the sampled
/// radius, and the reading at the exact query point.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardTypeResult {
    pub max: SeverityReading,
    pub center: SeverityReading,
}

impl HazardTypeResult {
    /// Both fields carry the no-data sentinel.
    pub fn no_data() -> Self {
        Self {
            max: SeverityReading::no_data(),
            center: SeverityReading::no_data(),
        }
    }

    /// Both fields carry the processing-failed sentinel.
    pub fn processing_failed() -> Self {
        Self {
            max: SeverityReading::processing_failed(),
            center: SeverityReading::processing_failed(),
        }
    }
}

// External consumers read `max_info`/`center_info` description strings; the
// numeric weights are an internal ordering detail.
impl Serialize for HazardTypeResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("HazardTypeResult", 2)?;
        s.serialize_field("max_info", &self.max.description)?;
        s.serialize_field("center_info", &self.center.description)?;
        s.end()
    }
}

/// Reduce per-point readings to a (max, center) pair.
///
/// `readings` is indexed by sample-set position (index 0 = center); `None`
/// marks a point where no sample could be obtained (tile missing, load
/// failure). The max comparison is strictly-greater, so the first reading
/// encountered in sample order wins ties.
///
/// A point with no reading contributes nothing, and if *no* point contributed
/// the result is the no-data sentinel rather than "no risk" — total upstream
/// failure must stay distinguishable from a genuine negative reading.
pub fn reduce_readings(readings: &[Option<SeverityReading>]) -> HazardTypeResult {
    let mut max: Option<SeverityReading> = None;

    for reading in readings.iter().flatten() {
        match &max {
            Some(current) if reading.weight <= current.weight => {}
            _ => max = Some(reading.clone()),
        }
    }

    let center = match readings.first() {
        Some(Some(reading)) => reading.clone(),
        _ => SeverityReading::no_data(),
    };

    HazardTypeResult {
        max: max.unwrap_or_else(SeverityReading::no_data),
        center,
    }
}
