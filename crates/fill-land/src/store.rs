//! Polygon dataset storage (S3-compatible object storage).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::{aws::AmazonS3Builder, path::Path, ObjectStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use hazard_common::{HazardError, HazardResult};

/// Configuration for the fill-land polygon store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolygonStoreConfig {
    /// Bucket holding the partitioned dataset
    pub bucket: String,
    /// Key prefix (dataset folder)
    pub prefix: String,
    /// File name prefix, completed by the region code
    pub file_prefix: String,
    /// AWS region
    pub region: String,
    /// Optional custom endpoint (e.g. local MinIO)
    pub endpoint: Option<String>,
    /// Skip request signing (public buckets, local testing)
    pub skip_signature: bool,
}

impl Default for PolygonStoreConfig {
    fn default() -> Self {
        Self {
            bucket: "hazard-fill-land-storage".to_string(),
            prefix: "A54-23_GEOJSON".to_string(),
            file_prefix: "A54-23_".to_string(),
            region: "ap-northeast-1".to_string(),
            endpoint: None,
            skip_signature: false,
        }
    }
}

impl PolygonStoreConfig {
    /// Object key for a region's polygon collection.
    pub fn region_key(&self, region_code: &str) -> String {
        format!("{}/{}{}.geojson", self.prefix, self.file_prefix, region_code)
    }
}

/// Narrow storage interface the containment source depends on, enabling
/// in-memory substitution in tests.
#[async_trait]
pub trait PolygonStore: Send + Sync {
    /// Load the raw GeoJSON bytes for one region, `None` if the region has
    /// no published dataset file.
    async fn load_region(&self, region_code: &str) -> HazardResult<Option<Bytes>>;
}

/// Object-storage-backed polygon store.
pub struct S3PolygonStore {
    store: Arc<dyn ObjectStore>,
    config: PolygonStoreConfig,
}

impl S3PolygonStore {
    pub fn new(config: PolygonStoreConfig) -> HazardResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint).with_allow_http(true);
        }
        if config.skip_signature {
            builder = builder.with_skip_signature(true);
        }

        let store = builder
            .build()
            .map_err(|e| HazardError::StorageError(format!("Failed to create S3 client: {}", e)))?;

        Ok(Self {
            store: Arc::new(store),
            config,
        })
    }
}

#[async_trait]
impl PolygonStore for S3PolygonStore {
    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn load_region(&self, region_code: &str) -> HazardResult<Option<Bytes>> {
        let key = self.config.region_key(region_code);
        let location = Path::from(key.as_str());

        let result = match self.store.get(&location).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => {
                debug!(region = region_code, key = %key, "No dataset file for region");
                return Ok(None);
            }
            Err(e) => {
                return Err(HazardError::StorageError(format!(
                    "Failed to read {}: {}",
                    key, e
                )))
            }
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| HazardError::StorageError(format!("Failed to read bytes: {}", e)))?;

        debug!(region = region_code, size = bytes.len(), "Loaded region polygons");
        Ok(Some(bytes))
    }
}

/// In-memory polygon store for tests.
#[derive(Default)]
pub struct MemoryPolygonStore {
    regions: HashMap<String, Bytes>,
}

impl MemoryPolygonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, code: impl Into<String>, geojson: impl Into<Bytes>) -> Self {
        self.regions.insert(code.into(), geojson.into());
        self
    }
}

#[async_trait]
impl PolygonStore for MemoryPolygonStore {
    async fn load_region(&self, region_code: &str) -> HazardResult<Option<Bytes>> {
        Ok(self.regions.get(region_code).cloned())
    }
}
