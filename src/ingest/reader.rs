//! Per-file ingestion: CSV decoding and record folding
//!
//! Row-level problems (undecodable row, malformed or out-of-bounds date,
//! unsupported year) skip the row and continue; I/O failures mid-file
//! abort the file and surface to the worker, which keeps the rows already
//! folded and moves on.

use crate::config::StatsConfig;
use crate::error::Result;
use crate::ingest::record::{DriveRecord, RawRow};
use crate::stats::FleetStats;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Row totals for one fully processed file
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSummary {
    /// Rows folded into the aggregate
    pub rows_folded: u64,

    /// Rows rejected by validation
    pub rows_skipped: u64,
}

/// Read one snapshot file, folding every valid row into `fleet`
pub fn read_stats_file(
    path: &Path,
    fleet: &mut FleetStats,
    config: &StatsConfig,
) -> Result<FileSummary> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let mut summary = FileSummary::default();

    for row in reader.deserialize::<RawRow>() {
        let raw = match row {
            Ok(raw) => raw,
            Err(e) if is_row_error(&e) => {
                debug!(file = %path.display(), error = %e, "skipping undecodable row");
                summary.rows_skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let record = match DriveRecord::from_row(raw) {
            Ok(record) => record,
            Err(e) => {
                debug!(file = %path.display(), error = %e, "skipping row");
                summary.rows_skipped += 1;
                continue;
            }
        };

        match fleet.fold(record, config) {
            Ok(()) => summary.rows_folded += 1,
            Err(e) => {
                debug!(file = %path.display(), error = %e, "skipping row");
                summary.rows_skipped += 1;
            }
        }
    }

    Ok(summary)
}

/// Whether a CSV error is confined to one row (decode problem) rather
/// than a file-level failure (I/O)
fn is_row_error(error: &csv::Error) -> bool {
    matches!(
        error.kind(),
        csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatsError;
    use std::fs;

    const HEADER: &str = "date,serial_number,model,capacity_bytes,failure,smart_9_raw\n";

    fn write_file(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("{HEADER}{body}")).unwrap();
        path
    }

    #[test]
    fn test_folds_valid_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "day.csv",
            "2019-05-02,Z1F0XYZ,ST4000DM000,4000787030016,0,24527\n\
             2019-05-02,Z1F0ABC,ST4000DM000,4000787030016,1,\n",
        );

        let mut fleet = FleetStats::new();
        let summary = read_stats_file(&path, &mut fleet, &StatsConfig::default()).unwrap();

        assert_eq!(summary.rows_folded, 2);
        assert_eq!(summary.rows_skipped, 0);
        assert_eq!(fleet.drive_count(), 2);
        assert_eq!(fleet.max_failure_width, 1);
    }

    #[test]
    fn test_bad_rows_do_not_abort_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "day.csv",
            "2019-05-02,S1,M,4000787030016,0,\n\
             2019-13-01,S2,M,4000787030016,0,\n\
             garbage,S3,M,4000787030016,0,\n\
             2019-05-02,S4,M,not-a-number,zero,\n\
             2019-05-03,S1,M,4000787030016,0,\n",
        );

        let mut fleet = FleetStats::new();
        let summary = read_stats_file(&path, &mut fleet, &StatsConfig::default()).unwrap();

        // Rows after the rejected ones are still folded.
        assert_eq!(summary.rows_folded, 2);
        assert_eq!(summary.rows_skipped, 3);
        let drive = &fleet.models["M"].drives["S1"];
        assert_eq!(drive.total_drive_days(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut fleet = FleetStats::new();
        let err = read_stats_file(
            &dir.path().join("absent.csv"),
            &mut fleet,
            &StatsConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, StatsError::Io(_)));
    }

    #[test]
    fn test_extra_smart_columns_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("day.csv");
        fs::write(
            &path,
            "date,serial_number,model,capacity_bytes,failure,smart_1_raw,smart_9_raw,smart_194_raw\n\
             2019-05-02,Z1F0XYZ,ST4000DM000,4000787030016,0,117,24527,26\n",
        )
        .unwrap();

        let mut fleet = FleetStats::new();
        let summary = read_stats_file(&path, &mut fleet, &StatsConfig::default()).unwrap();
        assert_eq!(summary.rows_folded, 1);
        assert_eq!(
            fleet.models["ST4000DM000"].drives["Z1F0XYZ"].initial_power_on_hours,
            Some(24527)
        );
    }
}
