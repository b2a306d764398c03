//! Ingest worker threads
//!
//! Each worker:
//! - Claims snapshot paths from the shared work queue
//! - Decodes each file and folds its rows into a private FleetStats
//! - Absorbs file-level failures and moves on to its next path
//! - Returns its aggregate when the queue is exhausted

use crate::config::RunConfig;
use crate::error::{FileOutcome, WorkerError};
use crate::ingest::queue::WorkQueue;
use crate::ingest::reader::read_stats_file;
use crate::stats::FleetStats;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};

/// Statistics collected by a worker
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Files fully processed
    pub files_processed: AtomicU64,

    /// Rows folded into the aggregate
    pub rows_folded: AtomicU64,

    /// Rows rejected by validation
    pub rows_skipped: AtomicU64,

    /// Files aborted by read errors
    pub read_errors: AtomicU64,
}

impl WorkerStats {
    fn record_file(&self) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_rows(&self, folded: u64, skipped: u64) {
        self.rows_folded.fetch_add(folded, Ordering::Relaxed);
        self.rows_skipped.fetch_add(skipped, Ordering::Relaxed);
    }

    fn record_read_error(&self) {
        self.read_errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// A worker thread that ingests snapshot files
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle; the thread's return value is its private aggregate
    handle: Option<JoinHandle<FleetStats>>,

    /// Worker statistics
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(
        id: usize,
        config: Arc<RunConfig>,
        queue: Arc<WorkQueue>,
    ) -> Result<Self, WorkerError> {
        let stats = Arc::new(WorkerStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("ingest-{id}"))
            .spawn(move || worker_loop(id, &config, &queue, &stats_clone))
            .map_err(|e| WorkerError::SpawnFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    /// Whether the worker's thread has returned
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| handle.is_finished())
            .unwrap_or(true)
    }

    /// Wait for the worker and take ownership of its aggregate
    pub fn join(mut self) -> Result<FleetStats, WorkerError> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| WorkerError::Panicked { id: self.id }),
            None => Ok(FleetStats::new()),
        }
    }
}

/// Main worker loop: drain the queue, one file at a time
fn worker_loop(
    id: usize,
    config: &RunConfig,
    queue: &WorkQueue,
    stats: &WorkerStats,
) -> FleetStats {
    debug!(worker = id, "worker starting");

    let mut fleet = FleetStats::new();

    while let Some(path) = queue.next() {
        let outcome = ingest_file(path, &mut fleet, config, stats);
        match outcome {
            FileOutcome::Success {
                path,
                rows_folded,
                rows_skipped,
            } => {
                trace!(
                    worker = id,
                    file = %path.display(),
                    rows = rows_folded,
                    skipped = rows_skipped,
                    "file ingested"
                );
            }
            FileOutcome::Failed { path, error } => {
                warn!(
                    worker = id,
                    file = %path.display(),
                    error = %error,
                    "file aborted; rows folded so far are kept"
                );
            }
        }
    }

    debug!(
        worker = id,
        files = stats.files_processed.load(Ordering::Relaxed),
        rows = stats.rows_folded.load(Ordering::Relaxed),
        "worker finished"
    );

    fleet
}

/// Ingest a single file, containing any failure to that file
fn ingest_file(
    path: PathBuf,
    fleet: &mut FleetStats,
    config: &RunConfig,
    stats: &WorkerStats,
) -> FileOutcome {
    match read_stats_file(&path, fleet, &config.stats) {
        Ok(summary) => {
            stats.record_file();
            stats.record_rows(summary.rows_folded, summary.rows_skipped);
            FileOutcome::Success {
                path,
                rows_folded: summary.rows_folded,
                rows_skipped: summary.rows_skipped,
            }
        }
        Err(error) => {
            stats.record_read_error();
            FileOutcome::Failed { path, error }
        }
    }
}

/// Aggregate row/file totals from all workers
pub fn aggregate_stats(workers: &[Worker]) -> (u64, u64, u64, u64) {
    let mut files = 0u64;
    let mut rows = 0u64;
    let mut skipped = 0u64;
    let mut errors = 0u64;

    for worker in workers {
        files += worker.stats.files_processed.load(Ordering::Relaxed);
        rows += worker.stats.rows_folded.load(Ordering::Relaxed);
        skipped += worker.stats.rows_skipped.load(Ordering::Relaxed);
        errors += worker.stats.read_errors.load(Ordering::Relaxed);
    }

    (files, rows, skipped, errors)
}
