//! Point-in-polygon evaluation across a sample set.

use std::collections::HashMap;
use std::sync::Arc;

use geo::{Contains, Geometry, Point};
use geojson::{FeatureCollection, GeoJson};
use tracing::{instrument, warn};

use hazard_common::{
    reduce_readings, GeoPoint, HazardError, HazardResult, HazardTypeResult, SampleSet,
    SeverityReading,
};

use crate::region::RegionResolver;
use crate::store::PolygonStore;

/// Label reported when a point lies inside a fill-land polygon.
const PRESENT_LABEL: &str = "あり";
/// Label reported when no polygon contains the point.
const ABSENT_LABEL: &str = "情報なし";

/// Containment source for the large-scale fill land dataset.
///
/// Region codes come from the external resolver; each unique region's polygon
/// collection is loaded and parsed at most once per evaluation (the polygon
/// analogue of tile deduplication).
pub struct FillLandSource {
    store: Arc<dyn PolygonStore>,
    resolver: Arc<dyn RegionResolver>,
}

impl FillLandSource {
    pub fn new(store: Arc<dyn PolygonStore>, resolver: Arc<dyn RegionResolver>) -> Self {
        Self { store, resolver }
    }

    /// Evaluate containment for every sample point and reduce to (max, center).
    ///
    /// A point whose region cannot be resolved or loaded carries the
    /// processing-failed sentinel; it never aborts the evaluation.
    #[instrument(skip(self, samples))]
    pub async fn evaluate(&self, samples: &SampleSet) -> HazardTypeResult {
        // Resolve each point's region, then load every unique region once.
        let mut codes: Vec<Option<String>> = Vec::with_capacity(samples.len());
        for point in samples {
            match self.resolver.region_code(point).await {
                Ok(code) => codes.push(Some(code)),
                Err(e) => {
                    warn!(lat = point.lat, lon = point.lon, error = %e, "Region resolution failed");
                    codes.push(None);
                }
            }
        }

        let mut regions: HashMap<String, Option<Vec<Geometry<f64>>>> = HashMap::new();
        for code in codes.iter().flatten() {
            if !regions.contains_key(code) {
                let loaded = match self.load_collection(code).await {
                    Ok(collection) => collection,
                    Err(e) => {
                        warn!(region = %code, error = %e, "Failed to load region polygons");
                        None
                    }
                };
                regions.insert(code.clone(), loaded);
            }
        }

        let readings: Vec<Option<SeverityReading>> = samples
            .iter()
            .zip(&codes)
            .map(|(point, code)| {
                let reading = match code.as_ref().and_then(|c| regions.get(c)) {
                    Some(Some(collection)) => classify_containment(collection, point),
                    _ => SeverityReading::processing_failed(),
                };
                Some(reading)
            })
            .collect();

        reduce_readings(&readings)
    }

    /// Load and parse one region's polygon collection.
    ///
    /// `Ok(None)` means the region genuinely has no dataset file, which is a
    /// valid "no fill land here" outcome, not a failure.
    async fn load_collection(&self, code: &str) -> HazardResult<Option<Vec<Geometry<f64>>>> {
        let Some(bytes) = self.store.load_region(code).await? else {
            return Ok(Some(Vec::new()));
        };

        let text = std::str::from_utf8(&bytes)
            .map_err(|e| HazardError::SchemaError(format!("Region {} is not UTF-8: {}", code, e)))?;

        let geojson: GeoJson = text
            .parse()
            .map_err(|e| HazardError::SchemaError(format!("Region {} GeoJSON: {}", code, e)))?;

        let features = FeatureCollection::try_from(geojson)
            .map_err(|e| HazardError::SchemaError(format!("Region {} features: {}", code, e)))?;

        let mut geometries = Vec::with_capacity(features.features.len());
        for feature in features {
            if let Some(geometry) = feature.geometry {
                let converted = Geometry::<f64>::try_from(geometry.value).map_err(|e| {
                    HazardError::SchemaError(format!("Region {} geometry: {}", code, e))
                })?;
                geometries.push(converted);
            }
        }

        Ok(Some(geometries))
    }
}

/// Binary containment reading: first containing feature short-circuits.
///
/// Storage order is semantically irrelevant here; the dataset's polygons do
/// not overlap by construction.
fn classify_containment(collection: &[Geometry<f64>], point: &GeoPoint) -> SeverityReading {
    let p = Point::new(point.lon, point.lat);

    for geometry in collection {
        if geometry.contains(&p) {
            return SeverityReading::new(PRESENT_LABEL, 1.0);
        }
    }

    SeverityReading::no_risk(ABSENT_LABEL)
}
