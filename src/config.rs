//! Configuration types for drive-stats
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation
//! - The constant ranges (supported years, plausible capacities) used by
//!   record validation

use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate};
use clap::Parser;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Expected extension for both input snapshot files and the output table
pub const TABLE_EXTENSION: &str = "csv";

/// Aggregate daily drive snapshot files into per-drive lifetime statistics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "drive-stats",
    version,
    about = "Aggregates daily drive snapshot CSVs into per-drive lifetime statistics",
    long_about = "Reads daily per-drive snapshot files (one row per drive per calendar day)\n\
                  and produces one consolidated table with monthly operating-day counts,\n\
                  observed failure dates, and maximum observed capacity per drive.",
    after_help = "EXAMPLES:\n    \
        drive-stats data_Q1_2019/ stats.csv\n    \
        drive-stats 2019-05-02.csv stats.csv -w 4\n    \
        drive-stats snapshots/ stats.csv -q"
)]
pub struct CliArgs {
    /// Input snapshot file, or directory scanned recursively for .csv files
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output table file (.csv)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Number of ingest worker threads
    #[arg(
        short = 'w',
        long,
        default_value_t = default_workers(),
        value_name = "NUM"
    )]
    pub workers: usize,

    /// Quiet mode - suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (per-row skip details)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

fn default_workers() -> usize {
    num_cpus::get()
}

const fn gigabytes(count: i64) -> i64 {
    count * 1000 * 1000 * 1000
}

/// Constant ranges used by fold/validation logic.
///
/// Held as explicit configuration rather than ambient globals so the
/// validity window is testable and swappable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsConfig {
    /// First calendar year with counter slots
    pub first_year: i32,

    /// Last calendar year with counter slots (inclusive)
    pub last_year: i32,

    /// Smallest plausible drive capacity; very old drives
    pub min_capacity_bytes: i64,

    /// Largest plausible drive capacity; modern HAMR drives
    pub max_capacity_bytes: i64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            first_year: 2013,
            last_year: 2023,
            min_capacity_bytes: gigabytes(40),
            max_capacity_bytes: gigabytes(40) * 1000,
        }
    }
}

impl StatsConfig {
    /// Number of per-month counter slots in the supported window
    pub fn counter_slots(&self) -> usize {
        (self.last_year - self.first_year + 1) as usize * 12
    }

    /// Counter slot for a date, or `None` if the year is outside the
    /// supported window
    pub fn month_index(&self, date: NaiveDate) -> Option<usize> {
        let year = date.year();
        if year < self.first_year || year > self.last_year {
            return None;
        }
        Some((year - self.first_year) as usize * 12 + (date.month0() as usize))
    }

    /// Whether a capacity reading falls in the plausible range
    pub fn plausible_capacity(&self, bytes: i64) -> bool {
        (self.min_capacity_bytes..=self.max_capacity_bytes).contains(&bytes)
    }

    /// `YYYY-MM` column labels, one per counter slot, in slot order
    pub fn month_labels(&self) -> Vec<String> {
        let mut labels = Vec::with_capacity(self.counter_slots());
        for year in self.first_year..=self.last_year {
            for month in 1..=12 {
                labels.push(format!("{year}-{month:02}"));
            }
        }
        labels
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input snapshot file or directory
    pub input_path: PathBuf,

    /// Output table path
    pub output_path: PathBuf,

    /// Number of ingest worker threads
    pub worker_count: usize,

    /// Show progress indicator and summary
    pub show_progress: bool,

    /// Verbose logging
    pub verbose: bool,

    /// Validation ranges for fold logic
    pub stats: StatsConfig,
}

impl RunConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        if !args.input.exists() {
            return Err(ConfigError::InputNotFound { path: args.input });
        }

        // The output must carry the expected table extension; anything else
        // is a usage error before any work starts.
        let extension_ok = args
            .output
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(TABLE_EXTENSION))
            .unwrap_or(false);
        if !extension_ok {
            return Err(ConfigError::UnsupportedExtension {
                path: args.output,
                expected: TABLE_EXTENSION,
            });
        }

        if args.workers == 0 || args.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.workers,
                max: MAX_WORKERS,
            });
        }

        if let Some(parent) = args.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ConfigError::InvalidOutputPath {
                    path: args.output.clone(),
                    reason: format!("parent directory '{}' does not exist", parent.display()),
                });
            }
        }

        Ok(Self {
            input_path: args.input,
            output_path: args.output,
            worker_count: args.workers,
            show_progress: !args.quiet,
            verbose: args.verbose,
            stats: StatsConfig::default(),
        })
    }
}
