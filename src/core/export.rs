// SleepLog - core/export.rs
//
// CSV and JSON export of filtered records.
// Core layer: writes to any Write trait object.
//
// The CSV layout is the import layout, so an export can be re-imported.

use crate::core::model::SleepRecord;
use crate::util::constants::DATE_FORMAT;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV.
///
/// Writes: date, hours_slept
pub fn export_csv<W: Write>(
    records: &[SleepRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    csv_writer.write_record(["date", "hours_slept"]).map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                record.date().format(DATE_FORMAT).to_string(),
                record.hours_slept().to_string(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %export_path.display(), records = count, "CSV export written");
    Ok(count)
}

/// Export records to JSON (array of `{date, hours_slept}` objects).
pub fn export_json<W: Write>(
    records: &[SleepRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %export_path.display(), records = records.len(), "JSON export written");
    Ok(records.len())
}
