//! Large-scale fill land containment: tests sample points against a
//! region-partitioned polygon dataset held in object storage.

pub mod region;
pub mod source;
pub mod store;

pub use region::{RegionResolver, StaticRegionResolver};
pub use source::FillLandSource;
pub use store::{MemoryPolygonStore, PolygonStore, PolygonStoreConfig, S3PolygonStore};
