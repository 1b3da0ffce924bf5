//! Core types for the federal courts map: region records, slugs, and case data.

pub mod cases;
mod error;
pub mod region;
pub mod slug;

pub use cases::{CIRCUIT_COURTS, CaseDataset, CaseRecord, CircuitCourt};
pub use error::RegionError;
pub use region::{Feature, FeatureCollection, Region, RegionKind, load_regions, transform};
pub use slug::slugify;
