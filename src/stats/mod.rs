//! Aggregate data model: per-drive, per-model, and fleet-wide statistics
//!
//! The hierarchy mirrors the output table: a fleet maps model names to
//! [`ModelStats`], which map serial numbers to [`DriveStats`]. Each ingest
//! worker builds one private [`FleetStats`]; the reducer merges them into
//! the final store consumed by the exporter.

pub mod drive;
pub mod store;

pub use drive::DriveStats;
pub use store::{FleetStats, ModelStats};
