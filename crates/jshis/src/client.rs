//! HTTP client for the J-SHIS mesh probability API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{instrument, warn};

use hazard_common::{GeoPoint, HazardError, HazardResult};

use crate::probability::{IntensityThreshold, ProbabilityReading};

/// Configuration for the J-SHIS client.
#[derive(Debug, Clone)]
pub struct JshisConfig {
    /// Mesh API base URL (2020 edition, average case, all periods)
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for JshisConfig {
    fn default() -> Self {
        Self {
            base_url:
                "https://www.j-shis.bosai.go.jp/map/api/pshm/Y2020/AVR/TTL_MTTL/meshinfo.geojson"
                    .to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Trait for point-probability sources.
#[async_trait]
pub trait ProbabilitySource: Send + Sync {
    /// Probability at `point` for the given intensity threshold.
    ///
    /// Never errors: fetch and schema failures collapse to `NoData`, and a
    /// present-but-unparseable value to `ParseFailed`.
    async fn query_probability(
        &self,
        point: &GeoPoint,
        threshold: IntensityThreshold,
    ) -> ProbabilityReading;
}

/// Minimal view of the mesh API's GeoJSON response.
#[derive(Debug, Deserialize)]
struct MeshResponse {
    #[serde(default)]
    features: Vec<MeshFeature>,
}

#[derive(Debug, Deserialize)]
struct MeshFeature {
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
}

/// HTTP implementation against the public J-SHIS endpoint.
pub struct JshisClient {
    client: reqwest::Client,
    config: JshisConfig,
}

impl JshisClient {
    pub fn new(config: JshisConfig) -> HazardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| HazardError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    async fn fetch_mesh(&self, point: &GeoPoint) -> HazardResult<MeshResponse> {
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("position", format!("{},{}", point.lon, point.lat)),
                ("epsg", "4326".to_string()),
            ])
            .send()
            .await
            .map_err(|e| HazardError::FetchError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HazardError::UpstreamStatus {
                status: status.as_u16(),
                url: self.config.base_url.clone(),
            });
        }

        response
            .json::<MeshResponse>()
            .await
            .map_err(|e| HazardError::SchemaError(e.to_string()))
    }
}

#[async_trait]
impl ProbabilitySource for JshisClient {
    #[instrument(skip(self), fields(threshold = threshold.property_key()))]
    async fn query_probability(
        &self,
        point: &GeoPoint,
        threshold: IntensityThreshold,
    ) -> ProbabilityReading {
        match self.fetch_mesh(point).await {
            Ok(mesh) => extract_probability(&mesh, threshold),
            Err(e) => {
                warn!(lat = point.lat, lon = point.lon, error = %e, "Mesh query failed");
                ProbabilityReading::NoData
            }
        }
    }
}

/// Pull one threshold's probability out of a mesh response.
///
/// The API returns property values as strings; a missing feature or property
/// is absence, a non-numeric string is a parse failure.
fn extract_probability(mesh: &MeshResponse, threshold: IntensityThreshold) -> ProbabilityReading {
    let Some(value) = mesh
        .features
        .first()
        .and_then(|f| f.properties.get(threshold.property_key()))
    else {
        return ProbabilityReading::NoData;
    };

    match value {
        Value::Number(n) => n
            .as_f64()
            .map_or(ProbabilityReading::ParseFailed, ProbabilityReading::Value),
        Value::String(s) => s
            .parse::<f64>()
            .map_or(ProbabilityReading::ParseFailed, ProbabilityReading::Value),
        Value::Null => ProbabilityReading::NoData,
        _ => ProbabilityReading::ParseFailed,
    }
}
