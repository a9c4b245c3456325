// SleepLog - core/importer.rs
//
// Sleep log import: turns a comma-separated text source into records.
// Core layer: accepts Read trait objects, never touches the filesystem.
//
// Format:
//   line 1        header, discarded without validation
//   line 2..      <YYYY-MM-DD>,<hours>
//
// Fields are trimmed, blank lines are skipped, and every malformed row is
// reported with its line number while the rest of the source keeps parsing.

use crate::core::model::{ImportReport, RowFailure, SleepRecord};
use crate::util::constants::{self, DATE_FORMAT, FIELDS_PER_ROW, FIELD_SEPARATOR};
use crate::util::error::{ImportError, RowError};
use crate::util::logging::preview;
use chrono::NaiveDate;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Limits applied while importing.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub max_line_length: usize,
    pub max_row_failures: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_line_length: constants::DEFAULT_MAX_LINE_LENGTH,
            max_row_failures: constants::DEFAULT_MAX_ROW_FAILURES,
        }
    }
}

/// Import a sleep log from any byte source.
///
/// Returns every record that parsed, plus a failure entry for every row
/// that did not. Only a read failure or cancellation fails the import as a
/// whole.
///
/// # Arguments
/// * `source` - Raw bytes of the log (the app layer opens the file)
/// * `source_path` - Path used for error context and logging
/// * `config` - Import limits
/// * `cancel` - Optional flag checked before each line is read
pub fn import_sleep_log<R: Read>(
    source: R,
    source_path: &Path,
    config: &ImportConfig,
    cancel: Option<&AtomicBool>,
) -> Result<ImportReport, ImportError> {
    tracing::debug!(path = %source_path.display(), "Import started");

    let mut reader = BufReader::new(source);
    let mut builder = ReportBuilder::new(config);
    let mut buf: Vec<u8> = Vec::new();

    loop {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            tracing::info!(
                path = %source_path.display(),
                lines = builder.report.lines_processed,
                "Import cancelled"
            );
            return Err(ImportError::Cancelled {
                lines_read: builder.report.lines_processed,
            });
        }

        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| ImportError::SourceUnreadable {
                path: source_path.to_path_buf(),
                line_number: Some(builder.report.lines_processed + 1),
                source: e,
            })?;
        if read == 0 {
            break;
        }

        builder.push_bytes(&buf);
    }

    let report = builder.finish();
    log_outcome(source_path, &report);
    Ok(report)
}

/// Parse in-memory text with the same rules as [`import_sleep_log`].
pub fn parse_content(content: &str, config: &ImportConfig) -> ImportReport {
    let mut builder = ReportBuilder::new(config);
    for line in content.split_inclusive('\n') {
        builder.push_bytes(line.as_bytes());
    }
    builder.finish()
}

/// Parse one data row (without line terminator) into a record.
pub fn parse_row(line: &str) -> Result<SleepRecord, RowError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() != FIELDS_PER_ROW {
        return Err(RowError::ColumnCount {
            found: fields.len(),
            expected: FIELDS_PER_ROW,
        });
    }

    let date = parse_date(fields[0]).ok_or_else(|| RowError::InvalidDate {
        raw: fields[0].to_string(),
    })?;

    let hours = parse_hours(fields[1]).ok_or_else(|| RowError::InvalidHours {
        raw: fields[1].to_string(),
    })?;

    SleepRecord::new(date, hours)
}

/// Parse a `YYYY-MM-DD` calendar date: four-digit year, zero-padded month
/// and day, no sign and nothing around it.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Parse a finite decimal number of hours. Range is checked by `SleepRecord`.
pub fn parse_hours(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|h| h.is_finite())
}

// =============================================================================
// Report accumulation
// =============================================================================

/// Line-at-a-time accumulator shared by the streaming and in-memory paths.
struct ReportBuilder<'a> {
    config: &'a ImportConfig,
    report: ImportReport,
}

impl<'a> ReportBuilder<'a> {
    fn new(config: &'a ImportConfig) -> Self {
        Self {
            config,
            report: ImportReport::default(),
        }
    }

    /// Feed one physical line, terminator included if present.
    fn push_bytes(&mut self, raw: &[u8]) {
        self.report.lines_processed += 1;
        let line_number = self.report.lines_processed;

        // Header.
        if line_number == 1 {
            return;
        }

        let raw = strip_terminator(raw);

        if raw.len() > self.config.max_line_length {
            self.fail(
                line_number,
                RowError::LineTooLong {
                    length: raw.len(),
                    max: self.config.max_line_length,
                },
                None,
            );
            return;
        }

        let Ok(line) = std::str::from_utf8(raw) else {
            self.fail(line_number, RowError::InvalidEncoding, None);
            return;
        };

        if line.trim().is_empty() {
            self.report.blank_lines_skipped += 1;
            return;
        }

        match parse_row(line) {
            Ok(record) => self.report.records.push(record),
            Err(error) => self.fail(line_number, error, Some(line)),
        }
    }

    fn fail(&mut self, line_number: u64, error: RowError, line: Option<&str>) {
        tracing::debug!(
            line = line_number,
            reason = %error,
            text = %line.map(preview).unwrap_or_default(),
            "Row rejected"
        );
        if self.report.failures.len() < self.config.max_row_failures {
            self.report.failures.push(RowFailure { line_number, error });
        } else {
            self.report.suppressed_failures += 1;
        }
    }

    fn finish(self) -> ImportReport {
        self.report
    }
}

fn strip_terminator(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}

fn log_outcome(source_path: &Path, report: &ImportReport) {
    if report.is_complete() {
        tracing::info!(
            path = %source_path.display(),
            records = report.records.len(),
            lines = report.lines_processed,
            blank = report.blank_lines_skipped,
            "Import complete"
        );
    } else {
        tracing::warn!(
            path = %source_path.display(),
            records = report.records.len(),
            failed_rows = report.failed_rows(),
            suppressed = report.suppressed_failures,
            lines = report.lines_processed,
            "Import complete with invalid rows"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};
    use std::path::PathBuf;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn pairs(report: &ImportReport) -> Vec<(NaiveDate, f64)> {
        report
            .records
            .iter()
            .map(|r| (r.date(), r.hours_slept()))
            .collect()
    }

    fn import(content: &str) -> ImportReport {
        import_sleep_log(
            Cursor::new(content.as_bytes().to_vec()),
            &PathBuf::from("test.csv"),
            &ImportConfig::default(),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_import_basic_example() {
        let report = import("Date,Hours\n2024-01-01,7.5\n2024-01-02,6\n");
        assert_eq!(
            pairs(&report),
            vec![(day("2024-01-01"), 7.5), (day("2024-01-02"), 6.0)]
        );
        assert!(report.is_complete());
        assert_eq!(report.lines_processed, 3);
    }

    #[test]
    fn test_header_is_never_a_record() {
        // A header that would itself parse as a valid row.
        let report = import("2023-12-31,9\n2024-01-01,7\n");
        assert_eq!(pairs(&report), vec![(day("2024-01-01"), 7.0)]);
    }

    #[test]
    fn test_header_only_yields_nothing() {
        let report = import("Date,Hours\n");
        assert!(report.records.is_empty());
        assert!(report.failures.is_empty());
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        let report = import("");
        assert!(report.is_empty());
        assert_eq!(report.lines_processed, 0);
    }

    #[test]
    fn test_missing_trailing_newline() {
        let report = import("Date,Hours\n2024-01-01,7.5");
        assert_eq!(pairs(&report), vec![(day("2024-01-01"), 7.5)]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let report = import("Date,Hours\r\n2024-01-01,7.5\r\n2024-01-02,8\r\n");
        assert_eq!(report.records.len(), 2);
        assert!(report.is_complete());
    }

    #[test]
    fn test_invalid_date_does_not_corrupt_later_rows() {
        let report = import("Date,Hours\n2024-13-40,7.5\n2024-01-02,6\n");
        assert_eq!(pairs(&report), vec![(day("2024-01-02"), 6.0)]);
        assert_eq!(
            report.failures,
            vec![RowFailure {
                line_number: 2,
                error: RowError::InvalidDate {
                    raw: "2024-13-40".to_string()
                },
            }]
        );
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let report = import("Date,Hours\n2024-05-01,abc\n2024-05-02,7\n");
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.failures[0].line_number, 2);
        assert_eq!(
            report.failures[0].error,
            RowError::InvalidHours {
                raw: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_non_finite_hours_rejected() {
        let report = import("Date,Hours\n2024-05-01,inf\n2024-05-02,NaN\n");
        assert!(report.records.is_empty());
        assert_eq!(report.failed_rows(), 2);
    }

    #[test]
    fn test_out_of_range_hours_rejected() {
        let report = import("Date,Hours\n2024-05-01,-1\n2024-05-02,25\n");
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, RowError::HoursOutOfRange { .. })));
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_column_count_mismatch() {
        let report = import("Date,Hours\n2024-05-01\n2024-05-02,7,good\n");
        assert_eq!(
            report.failures.iter().map(|f| &f.error).collect::<Vec<_>>(),
            vec![
                &RowError::ColumnCount {
                    found: 1,
                    expected: 2
                },
                &RowError::ColumnCount {
                    found: 3,
                    expected: 2
                },
            ]
        );
    }

    #[test]
    fn test_blank_lines_skipped_not_failed() {
        let report = import("Date,Hours\n\n2024-01-01,7\n   \n2024-01-02,8\n\n");
        assert_eq!(report.records.len(), 2);
        assert!(report.is_complete());
        assert_eq!(report.blank_lines_skipped, 3);
        assert_eq!(report.lines_processed, 6);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let report = import("Date,Hours\n 2024-01-01 , 7.25 \n");
        assert_eq!(pairs(&report), vec![(day("2024-01-01"), 7.25)]);
    }

    #[test]
    fn test_duplicate_dates_are_kept() {
        let report = import("Date,Hours\n2024-01-01,7\n2024-01-01,3\n");
        assert_eq!(
            pairs(&report),
            vec![(day("2024-01-01"), 7.0), (day("2024-01-01"), 3.0)]
        );
    }

    #[test]
    fn test_invalid_utf8_row_reported() {
        let mut bytes = b"Date,Hours\n".to_vec();
        bytes.extend_from_slice(b"2024-01-01,\xff\xfe\n");
        bytes.extend_from_slice(b"2024-01-02,7\n");
        let report = import_sleep_log(
            Cursor::new(bytes),
            &PathBuf::from("bad.csv"),
            &ImportConfig::default(),
            None,
        )
        .unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.failures[0].error, RowError::InvalidEncoding);
        assert_eq!(report.failures[0].line_number, 2);
    }

    #[test]
    fn test_invalid_utf8_header_is_still_discarded() {
        let mut bytes = b"\xff\xfe header\n".to_vec();
        bytes.extend_from_slice(b"2024-01-02,7\n");
        let report = import_sleep_log(
            Cursor::new(bytes),
            &PathBuf::from("bom.csv"),
            &ImportConfig::default(),
            None,
        )
        .unwrap();
        assert_eq!(report.records.len(), 1);
        assert!(report.is_complete());
    }

    #[test]
    fn test_line_too_long_reported() {
        let config = ImportConfig {
            max_line_length: 20,
            ..ImportConfig::default()
        };
        let content = format!("Date,Hours\n2024-01-01,7{}\n2024-01-02,8\n", "0".repeat(40));
        let report = parse_content(&content, &config);
        assert_eq!(report.records.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            RowError::LineTooLong { max: 20, .. }
        ));
    }

    #[test]
    fn test_failure_cap_counts_suppressed() {
        let config = ImportConfig {
            max_row_failures: 2,
            ..ImportConfig::default()
        };
        let content = "Date,Hours\nx\ny\nz\nw\n2024-01-01,7\n";
        let report = parse_content(content, &config);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.suppressed_failures, 2);
        assert_eq!(report.failed_rows(), 4);
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_parse_content_matches_streaming() {
        let content = "Date,Hours\n2024-01-01,7.5\nbad\n\n2024-01-03,5\n";
        assert_eq!(parse_content(content, &ImportConfig::default()), import(content));
    }

    #[test]
    fn test_cancel_flag_stops_import() {
        let cancel = AtomicBool::new(true);
        let result = import_sleep_log(
            Cursor::new(b"Date,Hours\n2024-01-01,7\n".to_vec()),
            &PathBuf::from("test.csv"),
            &ImportConfig::default(),
            Some(&cancel),
        );
        assert!(matches!(result, Err(ImportError::Cancelled { lines_read: 0 })));
    }

    /// Reader that yields some bytes and then fails.
    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device gone")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_read_failure_is_source_unreadable() {
        let reader = FailingReader {
            data: Cursor::new(b"Date,Hours\n2024-01-01,7\n".to_vec()),
        };
        let result = import_sleep_log(
            reader,
            &PathBuf::from("flaky.csv"),
            &ImportConfig::default(),
            None,
        );
        match result {
            Err(ImportError::SourceUnreadable { line_number, .. }) => {
                assert_eq!(line_number, Some(3));
            }
            other => panic!("expected SourceUnreadable, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_row_direct() {
        let r = parse_row("2024-02-29,8").unwrap();
        assert_eq!(r.date(), day("2024-02-29"));
        assert!(matches!(
            parse_row("2023-02-29,8"),
            Err(RowError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_date_must_be_zero_padded_iso() {
        for line in ["2024-1-5,7", "+2024-01-05,7", "2024-01-5,7", "24-01-05,7", "2024/01/05,7"] {
            assert!(
                matches!(parse_row(line), Err(RowError::InvalidDate { .. })),
                "{line} should be an invalid date"
            );
        }
        let report = parse_content("Date,Hours\n2024-1-5,7\n2024-01-05,7\n", &ImportConfig::default());
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line_number, 2);
    }
}
