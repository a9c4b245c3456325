// SleepLog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants::{MAX_HOURS_SLEPT, MIN_HOURS_SLEPT};
use crate::util::error::{ImportError, RowError};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Sleep Record
// =============================================================================

/// One day's sleep observation.
///
/// Fields are private: a record is immutable once constructed and every
/// constructed record satisfies the hours invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepRecord {
    date: NaiveDate,
    hours_slept: f64,
}

impl SleepRecord {
    /// Build a record, rejecting non-finite or out-of-range hours.
    pub fn new(date: NaiveDate, hours_slept: f64) -> Result<Self, RowError> {
        if !hours_slept.is_finite() {
            return Err(RowError::InvalidHours {
                raw: hours_slept.to_string(),
            });
        }
        if !(MIN_HOURS_SLEPT..=MAX_HOURS_SLEPT).contains(&hours_slept) {
            return Err(RowError::HoursOutOfRange {
                value: hours_slept,
                min: MIN_HOURS_SLEPT,
                max: MAX_HOURS_SLEPT,
            });
        }
        Ok(Self { date, hours_slept })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn hours_slept(&self) -> f64 {
        self.hours_slept
    }
}

// =============================================================================
// Import results
// =============================================================================

/// A data row that could not become a record.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    /// 1-based physical line number in the source (the header is line 1).
    pub line_number: u64,
    pub error: RowError,
}

impl std::fmt::Display for RowFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.line_number, self.error)
    }
}

/// Batch result of one import.
///
/// Callers can always tell an empty file (no records, no failures) apart
/// from a file whose every row failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Successfully parsed records, in file order.
    pub records: Vec<SleepRecord>,

    /// Row failures in file order, capped at the configured maximum.
    pub failures: Vec<RowFailure>,

    /// Failures beyond the cap: counted but not kept.
    pub suppressed_failures: usize,

    /// Physical lines read, including the header and blank lines.
    pub lines_processed: u64,

    /// Whitespace-only lines skipped after the header.
    pub blank_lines_skipped: u64,
}

impl ImportReport {
    /// Total number of failed rows, including suppressed ones.
    pub fn failed_rows(&self) -> usize {
        self.failures.len() + self.suppressed_failures
    }

    /// True when no data row failed.
    pub fn is_complete(&self) -> bool {
        self.failed_rows() == 0
    }

    /// True when some rows were imported and some failed.
    pub fn is_partial(&self) -> bool {
        !self.records.is_empty() && !self.is_complete()
    }

    /// True when the source held no data rows at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.is_complete()
    }

    /// One-line human readable outcome for the status bar.
    pub fn describe(&self) -> String {
        match (self.records.len(), self.failed_rows()) {
            (0, 0) => "No data rows found.".to_string(),
            (n, 0) => format!("Imported {n} record(s)."),
            (0, f) => format!("Import failed: all {f} row(s) were invalid."),
            (n, f) => format!("Imported {n} record(s); {f} row(s) were invalid."),
        }
    }
}

// =============================================================================
// Import Progress (for UI updates)
// =============================================================================

/// Messages sent from the import thread to the UI thread.
#[derive(Debug)]
pub enum ImportProgress {
    /// The worker opened the source and began reading.
    Started { path: PathBuf },

    /// The import ran to the end of the source.
    Completed { path: PathBuf, report: ImportReport },

    /// The source could not be imported at all.
    Failed { path: PathBuf, error: ImportError },

    /// The import was cancelled before completion.
    Cancelled { path: PathBuf },
}
