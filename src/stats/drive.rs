//! Per-drive aggregate state
//!
//! A drive's lifetime is summarized as a fixed-length sequence of monthly
//! operating-day counters plus its observed failure dates. The counter
//! array is index-addressable by `(year - first_year) * 12 + (month - 1)`
//! and sized once from the configured year window.

use chrono::NaiveDate;

/// Lifetime statistics for a single physical drive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveStats {
    /// Operating-day counters, one slot per (year, month) pair in the
    /// supported window. Counters only increase.
    pub drive_days: Vec<u64>,

    /// Power-on hours reading captured at first sighting of the serial;
    /// never overwritten afterwards
    pub initial_power_on_hours: Option<u64>,

    /// Observed failure dates, ascending, duplicates kept
    pub failure_dates: Vec<NaiveDate>,
}

impl DriveStats {
    /// Create an empty drive aggregate with `slots` counter slots
    pub fn new(slots: usize, initial_power_on_hours: Option<u64>) -> Self {
        Self {
            drive_days: vec![0; slots],
            initial_power_on_hours,
            failure_dates: Vec::new(),
        }
    }

    /// Count one operating day in the given counter slot
    pub fn record_day(&mut self, slot: usize) {
        self.drive_days[slot] += 1;
    }

    /// Insert a failure date at its sorted position, keeping the sequence
    /// ascending. Returns the new sequence length.
    pub fn record_failure(&mut self, date: NaiveDate) -> usize {
        let at = self.failure_dates.partition_point(|d| *d <= date);
        self.failure_dates.insert(at, date);
        self.failure_dates.len()
    }

    /// Combine another aggregate for the same drive into this one.
    ///
    /// Counters are summed element-wise, failure dates are merged with a
    /// two-pointer merge of the two sorted sequences, and the power-on
    /// hours keep the first non-absent value. Returns the merged
    /// failure-sequence length.
    pub fn merge(&mut self, other: DriveStats) -> usize {
        debug_assert_eq!(self.drive_days.len(), other.drive_days.len());

        self.initial_power_on_hours = self.initial_power_on_hours.or(other.initial_power_on_hours);

        for (acc, add) in self.drive_days.iter_mut().zip(other.drive_days) {
            *acc += add;
        }

        self.failure_dates = merge_sorted(std::mem::take(&mut self.failure_dates), other.failure_dates);
        self.failure_dates.len()
    }

    /// Total operating days across all months
    pub fn total_drive_days(&self) -> u64 {
        self.drive_days.iter().sum()
    }
}

/// Stable two-pointer merge of two already-sorted date sequences
fn merge_sorted(left: Vec<NaiveDate>, right: Vec<NaiveDate>) -> Vec<NaiveDate> {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left_iter = left.into_iter().peekable();
    let mut right_iter = right.into_iter().peekable();

    loop {
        match (left_iter.peek(), right_iter.peek()) {
            (Some(l), Some(r)) => {
                if l <= r {
                    merged.push(left_iter.next().unwrap());
                } else {
                    merged.push(right_iter.next().unwrap());
                }
            }
            (Some(_), None) => {
                merged.extend(left_iter);
                break;
            }
            (None, _) => {
                merged.extend(right_iter);
                break;
            }
        }
    }

    merged
}
