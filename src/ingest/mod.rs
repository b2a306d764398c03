//! Parallel snapshot ingestion
//!
//! # Architecture
//!
//! ```text
//!            ┌──────────────────────────────┐
//!            │        FileDiscovery         │
//!            │  (single file or recursive   │
//!            │   walk filtered to .csv)     │
//!            └──────────────┬───────────────┘
//!                           │ lazy path sequence
//!                           ▼
//!            ┌──────────────────────────────┐
//!            │          WorkQueue           │
//!            │   (mutex-guarded dispenser)  │
//!            └──────┬───────┬───────┬───────┘
//!                   │       │       │
//!             ┌─────▼──┐ ┌──▼─────┐ ┌──▼─────┐
//!             │Worker 1│ │Worker 2│ │Worker N│
//!             │ fold → │ │ fold → │ │ fold → │
//!             │ Fleet₁ │ │ Fleet₂ │ │ Fleetₙ │
//!             └─────┬──┘ └──┬─────┘ └──┬─────┘
//!                   └───────┼──────────┘
//!                           ▼ join, then sequential merge
//!            ┌──────────────────────────────┐
//!            │       final FleetStats       │
//!            └──────────────────────────────┘
//! ```
//!
//! Phase 1 is shared-nothing: each worker folds records into a private
//! [`crate::stats::FleetStats`]; the queue mutex is the only shared
//! mutable state. Phase 2 reduces the per-worker stores sequentially on
//! the coordinator thread.

pub mod coordinator;
pub mod discovery;
pub mod queue;
pub mod record;
pub mod reader;
pub mod worker;

pub use coordinator::{IngestCoordinator, IngestProgress, RunResult};
pub use discovery::Discovery;
pub use queue::WorkQueue;
pub use record::{DriveRecord, RawRow};
pub use worker::{Worker, WorkerStats};
