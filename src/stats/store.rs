//! Fleet-wide aggregate store: the fold and merge rules
//!
//! [`FleetStats`] is the hierarchical in-memory structure
//! (model -> serial -> [`DriveStats`]) each ingest worker builds
//! independently. `fold` incorporates one snapshot record; `merge`
//! combines two complete stores. Both keep every drive's failure-date
//! sequence sorted and the derived `max_failure_width` current.

use crate::config::StatsConfig;
use crate::error::RecordError;
use crate::ingest::record::DriveRecord;
use crate::stats::drive::DriveStats;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::info;

/// Statistics for all drives of one hardware model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStats {
    /// Largest plausible capacity reading observed for this model
    pub capacity_bytes: Option<i64>,

    /// Per-drive aggregates keyed by serial number
    pub drives: HashMap<String, DriveStats>,
}

/// Aggregate store over every model and drive seen by one worker (or,
/// after reduction, by the whole run)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetStats {
    /// Per-model aggregates keyed by model name
    pub models: HashMap<String, ModelStats>,

    /// Largest failure-date-sequence length on any single drive; sizes
    /// the failure columns of the output table
    pub max_failure_width: usize,
}

impl FleetStats {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Incorporate one snapshot record.
    ///
    /// Model and serial are canonicalized by trimming whitespace before
    /// use as keys. A date outside the supported year window rejects the
    /// record; state changed by the earlier steps (model entry, capacity,
    /// drive entry) is kept, matching the fold's step order.
    pub fn fold(&mut self, record: DriveRecord, config: &StatsConfig) -> Result<(), RecordError> {
        let model_key = record.model.trim();
        let serial_key = record.serial_number.trim();

        let model = self.models.entry(model_key.to_string()).or_default();

        if let Some(capacity) = record
            .capacity_bytes
            .filter(|&bytes| config.plausible_capacity(bytes))
        {
            match model.capacity_bytes {
                Some(current) if capacity > current => {
                    info!(
                        model = model_key,
                        old = current,
                        new = capacity,
                        "model capacity reading increased"
                    );
                    model.capacity_bytes = Some(capacity);
                }
                None => model.capacity_bytes = Some(capacity),
                Some(_) => {}
            }
        }

        let slots = config.counter_slots();
        let drive = model
            .drives
            .entry(serial_key.to_string())
            .or_insert_with(|| DriveStats::new(slots, record.initial_power_on_hours()));

        let slot = config
            .month_index(record.date)
            .ok_or_else(|| RecordError::InvalidRecord {
                reason: format!(
                    "date {} outside supported years {}-{}",
                    record.date, config.first_year, config.last_year
                ),
            })?;
        drive.record_day(slot);

        if record.failure {
            let width = drive.record_failure(record.date);
            if width > self.max_failure_width {
                self.max_failure_width = width;
            }
        }

        Ok(())
    }

    /// Merge another complete store into this one, consuming it.
    ///
    /// Capacities take the maximum of both sides, counters are summed
    /// element-wise, and failure-date sequences are merged sorted. The
    /// combination is associative and commutative on all numeric and
    /// ordering state; only the relative order of the diagnostic
    /// "readings differ" log lines varies between runs.
    pub fn merge(&mut self, other: FleetStats) {
        let mut max_width = self.max_failure_width.max(other.max_failure_width);

        for (model_name, other_model) in other.models {
            match self.models.entry(model_name) {
                Entry::Vacant(slot) => {
                    slot.insert(other_model);
                }
                Entry::Occupied(mut slot) => {
                    let merged_capacity =
                        match (slot.get().capacity_bytes, other_model.capacity_bytes) {
                            (Some(ours), Some(theirs)) if ours != theirs => {
                                info!(
                                    model = slot.key().as_str(),
                                    ours, theirs, "capacity readings differ between stores"
                                );
                                Some(ours.max(theirs))
                            }
                            (ours, theirs) => ours.or(theirs),
                        };

                    let model = slot.get_mut();
                    model.capacity_bytes = merged_capacity;
                    for (serial, other_drive) in other_model.drives {
                        match model.drives.entry(serial) {
                            Entry::Vacant(drive_slot) => {
                                drive_slot.insert(other_drive);
                            }
                            Entry::Occupied(mut drive_slot) => {
                                let width = drive_slot.get_mut().merge(other_drive);
                                if width > max_width {
                                    max_width = width;
                                }
                            }
                        }
                    }
                }
            }
        }

        self.max_failure_width = max_width;
    }

    /// Number of distinct models seen
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Number of distinct (model, serial) pairs seen
    pub fn drive_count(&self) -> usize {
        self.models.values().map(|m| m.drives.len()).sum()
    }

    /// True when no record has been folded in
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
