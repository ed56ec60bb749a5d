//! Error types for hazard-sampling crates.

use thiserror::Error;

/// Result type alias using HazardError.
pub type HazardResult<T> = Result<T, HazardError>;

/// Primary error type for hazard sampling operations.
///
/// Most failures are recovered locally (a failed tile or point degrades one
/// field of the report); these variants surface only where a component cannot
/// produce any reading at all.
#[derive(Debug, Error)]
pub enum HazardError {
    // === Transport Errors ===
    #[error("Fetch failed: {0}")]
    FetchError(String),

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("Request timeout")]
    Timeout,

    // === Data Errors ===
    #[error("Failed to decode raster tile: {0}")]
    DecodeError(String),

    #[error("Unexpected upstream response shape: {0}")]
    SchemaError(String),

    // === Storage Errors ===
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Region resolution failed: {0}")]
    RegionError(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<serde_json::Error> for HazardError {
    fn from(err: serde_json::Error) -> Self {
        HazardError::SchemaError(format!("JSON error: {}", err))
    }
}
