// SleepLog - core/filter.rs
//
// Dashboard filter over a record snapshot.
// Active bounds are AND-combined; all but `below_hours` are inclusive.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::importer;
use crate::core::model::SleepRecord;
use crate::util::error::FilterError;
use chrono::NaiveDate;

/// Complete filter state. `None` means the bound is not applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SleepFilter {
    /// Earliest date shown (inclusive).
    pub date_start: Option<NaiveDate>,

    /// Latest date shown (inclusive).
    pub date_end: Option<NaiveDate>,

    /// Fewest hours shown (inclusive).
    pub min_hours: Option<f64>,

    /// Most hours shown (inclusive).
    pub max_hours: Option<f64>,

    /// Strict upper bound: only records with fewer hours are shown.
    pub below_hours: Option<f64>,
}

impl SleepFilter {
    /// Returns true if no bounds are active.
    pub fn is_empty(&self) -> bool {
        self.date_start.is_none()
            && self.date_end.is_none()
            && self.min_hours.is_none()
            && self.max_hours.is_none()
            && self.below_hours.is_none()
    }

    /// Interpret a user-typed date bound. Empty text clears the bound.
    pub fn parse_date_bound(input: &str) -> Result<Option<NaiveDate>, FilterError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        importer::parse_date(input)
            .map(Some)
            .ok_or_else(|| FilterError::InvalidDate {
                input: input.to_string(),
            })
    }

    /// Interpret a user-typed hours bound. Empty text clears the bound;
    /// NaN and infinities are rejected.
    pub fn parse_hours_bound(input: &str) -> Result<Option<f64>, FilterError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        importer::parse_hours(input)
            .map(Some)
            .ok_or_else(|| FilterError::InvalidHours {
                input: input.to_string(),
            })
    }

    /// Quick filter: nights shorter than `threshold` hours.
    pub fn short_nights(threshold: f64) -> Self {
        Self {
            below_hours: Some(threshold),
            ..Default::default()
        }
    }

    /// Check a single record against all active bounds.
    pub fn matches(&self, record: &SleepRecord) -> bool {
        let date = record.date();
        let hours = record.hours_slept();

        if self.date_start.is_some_and(|start| date < start) {
            return false;
        }
        if self.date_end.is_some_and(|end| date > end) {
            return false;
        }
        if self.min_hours.is_some_and(|min| hours < min) {
            return false;
        }
        if self.max_hours.is_some_and(|max| hours > max) {
            return false;
        }
        if self.below_hours.is_some_and(|below| hours >= below) {
            return false;
        }
        true
    }
}

/// Apply the filter to a snapshot, returning indices of matching records.
///
/// Indices point into `records`, so insertion order is kept and the view
/// can scroll virtually without copying records.
pub fn apply_filters(records: &[SleepRecord], filter: &SleepFilter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..records.len()).collect();
    }

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| filter.matches(record))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rec(date: &str, hours: f64) -> SleepRecord {
        SleepRecord::new(day(date), hours).unwrap()
    }

    fn sample() -> Vec<SleepRecord> {
        vec![
            rec("2024-01-01", 7.5),
            rec("2024-01-02", 5.0),
            rec("2024-01-03", 8.0),
            rec("2024-01-04", 6.0),
        ]
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let records = sample();
        assert_eq!(apply_filters(&records, &SleepFilter::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let filter = SleepFilter {
            date_start: Some(day("2024-01-02")),
            date_end: Some(day("2024-01-03")),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &filter), vec![1, 2]);
    }

    #[test]
    fn test_hours_range_is_inclusive() {
        let filter = SleepFilter {
            min_hours: Some(6.0),
            max_hours: Some(7.5),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &filter), vec![0, 3]);
    }

    #[test]
    fn test_combined_filters() {
        let filter = SleepFilter {
            date_start: Some(day("2024-01-02")),
            min_hours: Some(6.0),
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &filter), vec![2, 3]);
    }

    #[test]
    fn test_short_nights_excludes_threshold() {
        let filter = SleepFilter::short_nights(6.0);
        assert_eq!(apply_filters(&sample(), &filter), vec![1]);
    }

    #[test]
    fn test_parse_bounds() {
        assert_eq!(SleepFilter::parse_date_bound("").unwrap(), None);
        assert_eq!(
            SleepFilter::parse_date_bound(" 2024-01-02 ").unwrap(),
            Some(day("2024-01-02"))
        );
        assert_eq!(SleepFilter::parse_hours_bound("6.5").unwrap(), Some(6.5));
        assert!(SleepFilter::parse_date_bound("02/01/2024").is_err());
        assert!(SleepFilter::parse_hours_bound("lots").is_err());
    }

    #[test]
    fn test_date_bound_rejects_unpadded_or_signed() {
        assert!(SleepFilter::parse_date_bound("2024-1-2").is_err());
        assert!(SleepFilter::parse_date_bound("+2024-01-02").is_err());
    }

    #[test]
    fn test_hours_bound_rejects_non_finite() {
        for input in ["NaN", "inf", "-infinity"] {
            assert!(
                matches!(
                    SleepFilter::parse_hours_bound(input),
                    Err(FilterError::InvalidHours { .. })
                ),
                "{input} should be rejected"
            );
        }
    }
}
