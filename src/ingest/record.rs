//! Snapshot row parsing
//!
//! A [`RawRow`] is one deserialized CSV row; [`DriveRecord`] is the typed
//! record the fold rule consumes. Date validation distinguishes tokens
//! that do not parse at all (`MalformedDate`) from dates with a month or
//! day out of calendar bounds (`InvalidRecord`).

use crate::error::RecordError;
use chrono::NaiveDate;
use serde::Deserialize;

/// One raw row of a daily snapshot file.
///
/// Snapshot files carry dozens of SMART columns; serde ignores everything
/// not named here. The power-on-hours reading is kept as its raw token
/// and only parsed when a serial is first seen.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    pub date: String,
    pub serial_number: String,
    pub model: String,
    #[serde(default)]
    pub capacity_bytes: Option<i64>,
    pub failure: u8,
    /// Power-on hours (SMART attribute 9), raw
    #[serde(default, alias = "power_on_hours")]
    pub smart_9_raw: Option<String>,
}

/// A typed snapshot record, ready for folding
#[derive(Debug, Clone)]
pub struct DriveRecord {
    pub model: String,
    pub serial_number: String,
    pub date: NaiveDate,
    pub failure: bool,
    pub capacity_bytes: Option<i64>,
    power_on_hours_raw: Option<String>,
}

impl DriveRecord {
    /// Validate a raw row into a typed record
    pub fn from_row(row: RawRow) -> Result<Self, RecordError> {
        let date = parse_date(&row.date)?;
        Ok(Self {
            model: row.model,
            serial_number: row.serial_number,
            date,
            failure: row.failure != 0,
            capacity_bytes: row.capacity_bytes,
            power_on_hours_raw: row.smart_9_raw,
        })
    }

    /// Parse the power-on-hours token.
    ///
    /// Deferred so rows for already-known drives never pay for it. Some
    /// snapshot generations render the reading as a float ("24527.0");
    /// unparseable tokens yield `None`.
    pub fn initial_power_on_hours(&self) -> Option<u64> {
        let raw = self.power_on_hours_raw.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        raw.parse::<u64>().ok().or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|hours| *hours >= 0.0 && hours.is_finite())
                .map(|hours| hours as u64)
        })
    }
}

#[cfg(test)]
impl DriveRecord {
    /// Construct a record directly; support for fold/merge tests
    pub fn for_tests(
        model: &str,
        serial_number: &str,
        date: &str,
        failure: bool,
        capacity_bytes: Option<i64>,
        power_on_hours: Option<&str>,
    ) -> Self {
        Self {
            model: model.to_string(),
            serial_number: serial_number.to_string(),
            date: parse_date(date).expect("test date must be valid"),
            failure,
            capacity_bytes,
            power_on_hours_raw: power_on_hours.map(str::to_string),
        }
    }
}

/// Parse a `YYYY-MM-DD` date token
fn parse_date(token: &str) -> Result<NaiveDate, RecordError> {
    let malformed = || RecordError::MalformedDate {
        token: token.to_string(),
    };

    let trimmed = token.trim();
    let mut parts = trimmed.splitn(3, '-');
    let year: i32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(malformed)?;
    let month: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(malformed)?;
    let day: u32 = parts
        .next()
        .and_then(|p| p.parse().ok())
        .ok_or_else(malformed)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| RecordError::InvalidRecord {
        reason: format!("month or day out of bounds in date '{trimmed}'"),
    })
}
