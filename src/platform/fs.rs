// SleepLog - platform/fs.rs
//
// Filesystem access for the import pipeline.
// The core importer only sees a Read; opening and size checks live here.

use crate::util::error::ImportError;
use std::fs::File;
use std::path::Path;

/// Open a sleep log for import, refusing files larger than `max_size`.
pub fn open_import_source(path: &Path, max_size: u64) -> Result<File, ImportError> {
    let unreadable = |e| ImportError::SourceUnreadable {
        path: path.to_path_buf(),
        line_number: None,
        source: e,
    };

    let file = File::open(path).map_err(unreadable)?;
    let size = file.metadata().map_err(unreadable)?.len();

    if size > max_size {
        tracing::warn!(
            path = %path.display(),
            size,
            max = max_size,
            "Import source exceeds size limit"
        );
        return Err(ImportError::SourceTooLarge {
            path: path.to_path_buf(),
            size,
            max: max_size,
        });
    }

    tracing::debug!(path = %path.display(), size, "Import source opened");
    Ok(file)
}
