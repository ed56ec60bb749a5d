//! J-SHIS point-probability client.
//!
//! Queries the J-SHIS mesh API for 30-year seismic occurrence probabilities
//! at a coordinate, one request per sample point per intensity threshold.

pub mod client;
pub mod probability;

pub use client::{JshisClient, JshisConfig, ProbabilitySource};
pub use probability::{
    reduce_probabilities, sample_threshold, IntensityThreshold, ProbabilityReading,
    ProbabilityResult,
};
