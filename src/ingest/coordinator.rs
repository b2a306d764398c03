//! Ingest coordination - orchestrates the two-phase run
//!
//! The coordinator is responsible for:
//! - Building the work queue over the discovered input files
//! - Spawning and joining the ingest workers (phase 1, parallel)
//! - The sequential accumulator-style reduction of the per-worker
//!   stores (phase 2)
//! - Progress polling and final statistics

use crate::config::RunConfig;
use crate::error::Result;
use crate::ingest::discovery::Discovery;
use crate::ingest::queue::WorkQueue;
use crate::ingest::worker::{aggregate_stats, Worker};
use crate::progress::ProgressReporter;
use crate::stats::FleetStats;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a completed run
#[derive(Debug)]
pub struct RunResult {
    /// The reduced, fleet-wide aggregate
    pub fleet: FleetStats,

    /// Files fully processed
    pub files_processed: u64,

    /// Rows folded across all workers
    pub rows_folded: u64,

    /// Rows rejected by validation
    pub rows_skipped: u64,

    /// Files aborted by read errors
    pub read_errors: u64,

    /// Time taken for ingest and reduction
    pub duration: Duration,
}

/// Progress snapshot for display
#[derive(Debug, Clone)]
pub struct IngestProgress {
    /// Files dispensed to workers so far
    pub files: u64,

    /// Rows folded so far
    pub rows: u64,

    /// Rows rejected so far
    pub skipped: u64,

    /// Files aborted so far
    pub errors: u64,

    /// Elapsed time
    pub elapsed: Duration,
}

impl IngestProgress {
    /// Calculate rows per second rate
    pub fn rows_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.rows as f64 / secs
        } else {
            0.0
        }
    }
}

/// Coordinates the parallel ingest and the sequential reduction
pub struct IngestCoordinator {
    /// Configuration
    config: Arc<RunConfig>,

    /// Work queue over the discovered snapshot paths
    queue: Arc<WorkQueue>,

    /// Worker threads
    workers: Vec<Worker>,
}

impl IngestCoordinator {
    /// Create a coordinator for the configured input
    pub fn new(config: RunConfig) -> Self {
        let discovery = Discovery::new(&config.input_path);
        let queue = Arc::new(WorkQueue::new(discovery));

        Self {
            config: Arc::new(config),
            queue,
            workers: Vec::new(),
        }
    }

    /// Run the two-phase ingest, returning the reduced aggregate
    pub fn run(mut self, progress: Option<&ProgressReporter>) -> Result<RunResult> {
        let start = Instant::now();

        info!(
            input = %self.config.input_path.display(),
            workers = self.config.worker_count,
            "starting ingest"
        );

        self.spawn_workers()?;
        self.watch_workers(progress, start);

        let (files_processed, rows_folded, rows_skipped, read_errors) =
            aggregate_stats(&self.workers);

        let fleet = self.reduce()?;

        let duration = start.elapsed();
        info!(
            files = files_processed,
            rows = rows_folded,
            models = fleet.model_count(),
            drives = fleet.drive_count(),
            duration_secs = duration.as_secs(),
            "ingest completed"
        );

        Ok(RunResult {
            fleet,
            files_processed,
            rows_folded,
            rows_skipped,
            read_errors,
            duration,
        })
    }

    /// Spawn the configured number of ingest workers
    fn spawn_workers(&mut self) -> Result<()> {
        for id in 0..self.config.worker_count {
            let worker = Worker::spawn(id, Arc::clone(&self.config), Arc::clone(&self.queue))?;
            self.workers.push(worker);
        }

        debug!(count = self.workers.len(), "workers spawned");
        Ok(())
    }

    /// Poll worker liveness, feeding the progress display until all
    /// workers have drained the queue
    fn watch_workers(&self, progress: Option<&ProgressReporter>, start: Instant) {
        let poll_interval = Duration::from_millis(100);

        loop {
            if self.workers.iter().all(Worker::is_finished) {
                break;
            }

            if let Some(reporter) = progress {
                let (_, rows, skipped, errors) = aggregate_stats(&self.workers);
                reporter.update(&IngestProgress {
                    files: self.queue.dispensed(),
                    rows,
                    skipped,
                    errors,
                    elapsed: start.elapsed(),
                });
            }

            thread::sleep(poll_interval);
        }
    }

    /// Join all workers and fold their stores into one, sequentially.
    ///
    /// Deliberately not parallelized: the dominant cost is per-row
    /// parsing in phase 1, not the O(worker count) reduction. The merge
    /// rule is associative and commutative, so a tree-style parallel
    /// reduce would be a drop-in replacement if that ever changes.
    fn reduce(&mut self) -> Result<FleetStats> {
        let mut acc = FleetStats::new();

        for worker in std::mem::take(&mut self.workers) {
            let id = worker.id();
            let store = worker.join()?;
            debug!(
                worker = id,
                models = store.model_count(),
                drives = store.drive_count(),
                "merging worker store"
            );
            acc.merge(store);
        }

        Ok(acc)
    }
}
