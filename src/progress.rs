//! Progress reporting for the ingest run
//!
//! Provides a live status line using an indicatif spinner, plus the
//! console header and summary blocks.

use crate::ingest::coordinator::IngestProgress;
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter that displays ingest status
pub struct ProgressReporter {
    /// Spinner with a live message
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update the progress display
    pub fn update(&self, progress: &IngestProgress) {
        let mut msg = format!(
            "Files: {} | Rows: {} | Rate: {:.0}/s",
            format_number(progress.files),
            format_number(progress.rows),
            progress.rows_per_second(),
        );
        if progress.skipped > 0 {
            msg.push_str(&format!(" | Skipped: {}", format_number(progress.skipped)));
        }
        if progress.errors > 0 {
            msg.push_str(&format!(" | File errors: {}", format_number(progress.errors)));
        }

        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a header at the start of the run
pub fn print_header(input: &str, workers: usize, output: &str) {
    println!();
    println!(
        "{} {}",
        style("drive-stats").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Input:").bold(), input);
    println!("  {} {}", style("Workers:").bold(), workers);
    println!("  {} {}", style("Output:").bold(), output);
    println!();
}

/// Print a summary of the run
#[allow(clippy::too_many_arguments)]
pub fn print_summary(
    models: usize,
    drives: usize,
    rows: u64,
    files: u64,
    read_errors: u64,
    duration: Duration,
    output: &str,
    output_size: Option<u64>,
) {
    let duration_secs = duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        rows as f64 / duration_secs
    } else {
        0.0
    };

    println!();
    println!("{}", style("Aggregation Complete").green().bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Files:").bold(), format_number(files));
    println!("  {} {}", style("Rows:").bold(), format_number(rows));
    println!("  {} {}", style("Models:").bold(), format_number(models as u64));
    println!("  {} {}", style("Drives:").bold(), format_number(drives as u64));
    println!(
        "  {} {:.1}s ({:.0} rows/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    if read_errors > 0 {
        println!(
            "  {} {}",
            style("File errors:").yellow().bold(),
            format_number(read_errors)
        );
    }
    if let Some(size) = output_size {
        println!(
            "  {} {} ({})",
            style("Table:").bold(),
            output,
            format_size(size, BINARY)
        );
    } else {
        println!("  {} {}", style("Table:").bold(), output);
    }
    println!();
}
