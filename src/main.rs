//! drive-stats - Consolidated lifetime statistics for drive fleets
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use drive_stats::config::{CliArgs, RunConfig};
use drive_stats::export;
use drive_stats::ingest::IngestCoordinator;
use drive_stats::progress::{print_header, print_summary, ProgressReporter};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = RunConfig::from_args(args).context("Invalid configuration")?;

    // Print header
    if config.show_progress {
        print_header(
            &config.input_path.display().to_string(),
            config.worker_count,
            &config.output_path.display().to_string(),
        );
    }

    // Create progress reporter
    let progress = if config.show_progress {
        Some(ProgressReporter::new())
    } else {
        None
    };

    if let Some(ref p) = progress {
        p.set_status("Discovering snapshot files...");
    }

    // Run the parallel ingest and sequential reduction
    let coordinator = IngestCoordinator::new(config.clone());
    let result = coordinator.run(progress.as_ref()).context("Ingest failed")?;

    if let Some(ref p) = progress {
        p.finish("Ingest completed");
    }

    if result.fleet.is_empty() {
        info!("no records found under the input path");
    }

    // Serialize the reduced store
    let rows_written = export::write_stats(&result.fleet, &config.output_path, &config.stats)
        .with_context(|| format!("Failed to write {}", config.output_path.display()))?;

    let output_size = std::fs::metadata(&config.output_path).ok().map(|m| m.len());

    // Print summary
    if config.show_progress {
        print_summary(
            result.fleet.model_count(),
            result.fleet.drive_count(),
            result.rows_folded,
            result.files_processed,
            result.read_errors,
            result.duration,
            &config.output_path.display().to_string(),
            output_size,
        );
    }

    info!(rows = rows_written, "table written");

    if result.read_errors > 0 {
        info!(
            errors = result.read_errors,
            "run completed with file errors"
        );
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("drive_stats=debug,warn")
    } else {
        EnvFilter::new("drive_stats=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
