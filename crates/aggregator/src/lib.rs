//! Hazard aggregation: orchestrates every configured hazard source over one
//! shared sample set and reduces each to a (max, center) summary.

pub mod aggregate;
pub mod layers;
pub mod report;

pub use aggregate::{AggregatorConfig, HazardAggregator};
pub use report::{AggregatedReport, LandslideGroup};
