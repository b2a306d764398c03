//! Final table serialization
//!
//! Emits one row per (model, serial) pair. The number of failure columns
//! is derived from the widest failure sequence in the whole dataset;
//! drives with fewer failures are padded with empty cells. Zero counters
//! are rendered as empty cells to keep the table compact. Row order
//! follows the store's own iteration order and is deliberately not
//! sorted.

use crate::config::StatsConfig;
use crate::error::Result;
use crate::stats::FleetStats;
use std::path::Path;
use tracing::debug;

/// Fixed leading columns of the output table
const OUTPUT_PREFIX: [&str; 4] = [
    "model",
    "serial_number",
    "capacity_bytes",
    "initial_power_on_hour",
];

/// Serialize the reduced store to the output table. Returns the number
/// of data rows written.
pub fn write_stats(fleet: &FleetStats, path: &Path, config: &StatsConfig) -> Result<u64> {
    let mut writer = csv::Writer::from_path(path)?;

    let month_labels = config.month_labels();
    let mut header: Vec<String> = OUTPUT_PREFIX.iter().map(|s| s.to_string()).collect();
    for idx in 1..=fleet.max_failure_width {
        header.push(format!("failure_{idx}"));
    }
    header.extend(month_labels);
    writer.write_record(&header)?;

    let mut rows = 0u64;
    let mut row: Vec<String> = Vec::with_capacity(header.len());

    for (model, model_stats) in &fleet.models {
        for (serial, drive) in &model_stats.drives {
            row.clear();
            row.push(model.clone());
            row.push(serial.clone());
            row.push(optional_field(model_stats.capacity_bytes));
            row.push(optional_field(drive.initial_power_on_hours));

            for idx in 0..fleet.max_failure_width {
                row.push(
                    drive
                        .failure_dates
                        .get(idx)
                        .map(|date| date.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                );
            }

            for &count in &drive.drive_days {
                row.push(if count == 0 {
                    String::new()
                } else {
                    count.to_string()
                });
            }

            writer.write_record(&row)?;
            rows += 1;
        }
    }

    writer.flush()?;
    debug!(rows, file = %path.display(), "table written");
    Ok(rows)
}

fn optional_field<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::record::DriveRecord;

    fn folded_fleet() -> FleetStats {
        let config = StatsConfig::default();
        let mut fleet = FleetStats::new();
        fleet
            .fold(
                DriveRecord::for_tests(
                    "ST4000DM000",
                    "Z1F0XYZ",
                    "2019-05-02",
                    true,
                    Some(4_000_787_030_016),
                    Some("24527"),
                ),
                &config,
            )
            .unwrap();
        fleet
            .fold(
                DriveRecord::for_tests("ST4000DM000", "Z1F0XYZ", "2019-05-03", true, None, None),
                &config,
            )
            .unwrap();
        fleet
            .fold(
                DriveRecord::for_tests("ST4000DM000", "Z1F0ABC", "2019-06-01", false, None, None),
                &config,
            )
            .unwrap();
        fleet
    }

    #[test]
    fn test_header_layout() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("stats.csv");
        let config = StatsConfig::default();

        let rows = write_stats(&folded_fleet(), &out, &config).unwrap();
        assert_eq!(rows, 2);

        let mut reader = csv::Reader::from_path(&out).unwrap();
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();

        // 4 fixed columns, 2 failure columns (the widest drive), 132 months
        assert_eq!(header.len(), 4 + 2 + 132);
        assert_eq!(
            &header[..4],
            &[
                "model",
                "serial_number",
                "capacity_bytes",
                "initial_power_on_hour"
            ]
        );
        assert_eq!(header[4], "failure_1");
        assert_eq!(header[5], "failure_2");
        assert_eq!(header[6], "2013-01");
        assert_eq!(header[header.len() - 1], "2023-12");
    }

    #[test]
    fn test_rows_padded_and_sparse() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("stats.csv");
        let config = StatsConfig::default();
        let fleet = folded_fleet();

        write_stats(&fleet, &out, &config).unwrap();

        let mut reader = csv::Reader::from_path(&out).unwrap();
        let may_2019 = 4 + fleet.max_failure_width + config.month_index(
            chrono::NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(),
        )
        .unwrap();

        let mut seen = 0;
        for record in reader.records() {
            let record = record.unwrap();
            seen += 1;
            match &record[1] {
                "Z1F0XYZ" => {
                    assert_eq!(&record[2], "4000787030016");
                    assert_eq!(&record[3], "24527");
                    assert_eq!(&record[4], "2019-05-02");
                    assert_eq!(&record[5], "2019-05-03");
                    assert_eq!(&record[may_2019], "2");
                }
                "Z1F0ABC" => {
                    // No capacity or power-on reading, no failures: padded
                    assert_eq!(&record[2], "4000787030016");
                    assert_eq!(&record[3], "");
                    assert_eq!(&record[4], "");
                    assert_eq!(&record[5], "");
                    // Zero counters render as empty cells
                    assert_eq!(&record[may_2019], "");
                }
                other => panic!("unexpected serial {other}"),
            }
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_empty_store_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("stats.csv");

        let rows = write_stats(&FleetStats::new(), &out, &StatsConfig::default()).unwrap();
        assert_eq!(rows, 0);

        let mut reader = csv::Reader::from_path(&out).unwrap();
        assert_eq!(reader.headers().unwrap().len(), 4 + 132);
        assert_eq!(reader.records().count(), 0);
    }
}
