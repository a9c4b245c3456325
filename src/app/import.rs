// SleepLog - app/import.rs
//
// Import lifecycle management. Runs the importer on a background thread,
// sending progress messages to the UI thread via an mpsc channel.
//
// Architecture:
//   - `ImportManager` lives on the UI thread; `run_import` runs on a worker.
//   - An `Arc<AtomicBool>` cancel flag lets the UI stop the import; the
//     importer checks it before every line.
//   - The worker appends parsed records to the shared `SessionStore` in one
//     batch, then reports. A cancelled or failed import appends nothing.

use crate::core::importer::{self, ImportConfig};
use crate::core::model::ImportProgress;
use crate::core::store::SessionStore;
use crate::platform::fs::open_import_source;
use crate::util::error::ImportError;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

/// Everything a worker needs to import one file.
#[derive(Debug, Clone)]
pub struct ImportJob {
    pub path: PathBuf,
    pub config: ImportConfig,
    pub max_file_size: u64,
}

/// Manages an import operation on a background thread.
pub struct ImportManager {
    /// Channel receiver for the UI to poll progress messages.
    progress_rx: Option<mpsc::Receiver<ImportProgress>>,

    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl ImportManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start importing `job.path` into `store`.
    ///
    /// Spawns a background thread immediately; progress is sent over the
    /// channel. If an import is already running it is cancelled first.
    pub fn start_import(&mut self, job: ImportJob, store: Arc<SessionStore>) {
        self.cancel_import();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        tracing::info!(path = %job.path.display(), "Import started");

        std::thread::spawn(move || {
            run_import(job, store, tx, cancel);
        });
    }

    /// Request cancellation of the running import.
    /// The worker sends `ImportProgress::Cancelled` and exits.
    pub fn cancel_import(&mut self) {
        if let Some(flag) = self.cancel_flag.take() {
            flag.store(true, Ordering::SeqCst);
            tracing::debug!("Import cancellation requested");
        }
    }

    /// Poll for progress messages without blocking. Returns at most `max`
    /// pending messages; the rest stay queued for the next frame.
    pub fn poll_progress(&self, max: usize) -> Vec<ImportProgress> {
        let mut messages = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while messages.len() < max {
                match rx.try_recv() {
                    Ok(msg) => messages.push(msg),
                    Err(_) => break,
                }
            }
        }
        messages
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background import
// =============================================================================

fn run_import(
    job: ImportJob,
    store: Arc<SessionStore>,
    tx: mpsc::Sender<ImportProgress>,
    cancel: Arc<AtomicBool>,
) {
    let path = job.path;

    // Send failures mean the UI dropped the receiver (a newer import
    // replaced this one); there is nobody left to report to.
    let send = |msg: ImportProgress| {
        let _ = tx.send(msg);
    };

    let file = match open_import_source(&path, job.max_file_size) {
        Ok(f) => f,
        Err(error) => {
            tracing::error!(path = %path.display(), error = %error, "Import source rejected");
            send(ImportProgress::Failed { path, error });
            return;
        }
    };

    send(ImportProgress::Started { path: path.clone() });

    match importer::import_sleep_log(file, &path, &job.config, Some(&cancel)) {
        Ok(report) => {
            // Last chance to honour a cancel that raced the end of the file.
            if cancel.load(Ordering::SeqCst) {
                send(ImportProgress::Cancelled { path });
                return;
            }
            store.append_all(report.records.iter().copied());
            send(ImportProgress::Completed { path, report });
        }
        Err(ImportError::Cancelled { .. }) => {
            send(ImportProgress::Cancelled { path });
        }
        Err(error) => {
            tracing::error!(path = %path.display(), error = %error, "Import failed");
            send(ImportProgress::Failed { path, error });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    /// Block until the worker sends a terminal message.
    fn wait_for_outcome(manager: &ImportManager) -> ImportProgress {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            for msg in manager.poll_progress(16) {
                if !matches!(msg, ImportProgress::Started { .. }) {
                    return msg;
                }
            }
            assert!(Instant::now() < deadline, "import did not finish in time");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn job(path: PathBuf) -> ImportJob {
        ImportJob {
            path,
            config: ImportConfig::default(),
            max_file_size: 1024 * 1024,
        }
    }

    #[test]
    fn test_background_import_appends_to_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sleep.csv");
        std::fs::write(&path, "Date,Hours\n2024-01-01,7.5\nbad\n2024-01-02,6\n").unwrap();

        let store = Arc::new(SessionStore::new());
        let mut manager = ImportManager::new();
        manager.start_import(job(path.clone()), Arc::clone(&store));

        match wait_for_outcome(&manager) {
            ImportProgress::Completed { path: p, report } => {
                assert_eq!(p, path);
                assert_eq!(report.records.len(), 2);
                assert_eq!(report.failures.len(), 1);
                assert_eq!(report.failures[0].line_number, 3);
            }
            other => panic!("expected Completed, got {other:?}"),
        }
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_missing_file_reports_failure() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(SessionStore::new());
        let mut manager = ImportManager::new();
        manager.start_import(job(dir.path().join("absent.csv")), Arc::clone(&store));

        match wait_for_outcome(&manager) {
            ImportProgress::Failed { error, .. } => {
                assert!(matches!(error, ImportError::SourceUnreadable { .. }));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_poll_without_import_is_empty() {
        let manager = ImportManager::new();
        assert!(manager.poll_progress(10).is_empty());
    }
}
