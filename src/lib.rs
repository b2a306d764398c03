//! drive-stats - Consolidated lifetime statistics for drive fleets
//!
//! Converts large collections of daily per-drive snapshot files (one row
//! per physical drive per calendar day) into a single table of per-drive
//! lifetime statistics: monthly operating-day counts, observed failure
//! dates, and maximum observed capacity, grouped by model and serial
//! number.
//!
//! # Features
//!
//! - **Parallel ingestion**: one worker thread per core, each folding
//!   records into a private aggregate; no shared mutable state beyond
//!   the work queue's dispensing cursor.
//!
//! - **Deterministic reduction**: per-worker aggregates are merged with
//!   associative, commutative combination rules (sum, max, sorted
//!   union), so results do not depend on file-to-worker assignment.
//!
//! - **Fault containment**: a corrupt row skips the row, an unreadable
//!   file skips the file; neither aborts the run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 Snapshot files (.csv, one per day)               │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │ lazy discovery
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         WorkQueue                                │
//! │                 (mutex-guarded path dispenser)                   │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//!       ┌───────────────┬──────┴────────┬───────────────┐
//!       ▼               ▼               ▼               ▼
//! ┌───────────┐   ┌───────────┐   ┌───────────┐   ┌───────────┐
//! │ Worker 1  │   │ Worker 2  │   │ Worker 3  │   │ Worker N  │
//! │ FleetStats│   │ FleetStats│   │ FleetStats│   │ FleetStats│
//! └─────┬─────┘   └─────┬─────┘   └─────┬─────┘   └─────┬─────┘
//!       └───────────────┴───────┬───────┴───────────────┘
//!                               │ join, then sequential merge
//!                               ▼
//!                   ┌──────────────────────┐
//!                   │   final FleetStats   │
//!                   └──────────┬───────────┘
//!                              ▼
//!                   ┌──────────────────────┐
//!                   │   output table (.csv) │
//!                   └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Aggregate a quarter of daily snapshots
//! drive-stats data_Q1_2019/ stats.csv
//!
//! # Single file, four workers, quiet
//! drive-stats 2019-05-02.csv stats.csv -w 4 -q
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod progress;
pub mod stats;

pub use config::{CliArgs, RunConfig, StatsConfig};
pub use error::{Result, StatsError};
pub use ingest::{IngestCoordinator, RunResult};
pub use stats::{DriveStats, FleetStats, ModelStats};
