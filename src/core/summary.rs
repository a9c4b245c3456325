// SleepLog - core/summary.rs
//
// Dashboard statistics over a set of records.

use crate::core::model::SleepRecord;
use chrono::NaiveDate;

/// Aggregate figures for the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SleepSummary {
    pub count: usize,
    pub total_hours: f64,
    pub average_hours: Option<f64>,
    pub min_hours: Option<f64>,
    pub max_hours: Option<f64>,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,

    /// Records strictly below the short-sleep threshold.
    pub short_nights: usize,

    /// Mean of the last `recent_window` records in insertion order.
    pub recent_average: Option<f64>,
}

impl SleepSummary {
    /// Compute the summary over `records`.
    ///
    /// `recent_window` is the number of most recently inserted records
    /// averaged into `recent_average`.
    pub fn from_records<'a, I>(records: I, short_sleep_hours: f64, recent_window: usize) -> Self
    where
        I: IntoIterator<Item = &'a SleepRecord>,
    {
        let records: Vec<&SleepRecord> = records.into_iter().collect();
        if records.is_empty() {
            return Self::default();
        }

        let mut summary = Self {
            count: records.len(),
            ..Default::default()
        };

        for r in &records {
            let h = r.hours_slept();
            summary.total_hours += h;
            summary.min_hours = Some(summary.min_hours.map_or(h, |m| m.min(h)));
            summary.max_hours = Some(summary.max_hours.map_or(h, |m| m.max(h)));
            summary.earliest = Some(summary.earliest.map_or(r.date(), |d| d.min(r.date())));
            summary.latest = Some(summary.latest.map_or(r.date(), |d| d.max(r.date())));
            if h < short_sleep_hours {
                summary.short_nights += 1;
            }
        }
        summary.average_hours = Some(summary.total_hours / summary.count as f64);

        if recent_window > 0 {
            let start = records.len().saturating_sub(recent_window);
            let recent = &records[start..];
            let sum: f64 = recent.iter().map(|r| r.hours_slept()).sum();
            summary.recent_average = Some(sum / recent.len() as f64);
        }

        summary
    }
}
