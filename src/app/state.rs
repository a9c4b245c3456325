// SleepLog - app/state.rs
//
// Application state management. Holds the session store, the current
// display snapshot, filter state, import status and the chat shell.
// Owned by the eframe::App implementation.

use crate::app::event::{AppEvent, ExportFormat, View};
use crate::app::import::{ImportJob, ImportManager};
use crate::core::filter::{self, SleepFilter};
use crate::core::importer::ImportConfig;
use crate::core::model::{ImportProgress, ImportReport, SleepRecord};
use crate::core::store::SessionStore;
use crate::core::summary::SleepSummary;
use crate::core::export;
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::{Result, SleepLogError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Raw text of the dashboard filter inputs, as typed.
#[derive(Debug, Clone, Default)]
pub struct FilterInputs {
    pub date_start: String,
    pub date_end: String,
    pub min_hours: String,
    pub max_hours: String,
}

/// Outcome of the most recent completed import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub path: PathBuf,
    pub report: ImportReport,
}

/// The inert chat shell: a read-only history and a single-line input.
#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub history: Vec<String>,
    pub input: String,
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Validated configuration.
    pub config: AppConfig,

    /// Panel shown in the central area.
    pub view: View,

    /// Every record imported this session.
    pub store: Arc<SessionStore>,

    /// Snapshot of the store taken at the last refresh.
    pub records: Vec<SleepRecord>,

    /// Indices of records matching the current filter (into `records`).
    pub filtered_indices: Vec<usize>,

    /// Current filter configuration.
    pub filter: SleepFilter,

    /// Filter text inputs and the last parse error for them.
    pub filter_inputs: FilterInputs,
    pub filter_error: Option<String>,

    /// Statistics over the filtered records.
    pub summary: SleepSummary,

    /// File currently being imported, if any.
    pub import_in_progress: Option<PathBuf>,

    /// Most recent completed import.
    pub last_import: Option<ImportOutcome>,

    /// Whether to show the import report window.
    pub show_import_report: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, failed imports) for the session.
    pub warnings: Vec<String>,

    pub chat: ChatState,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state with an empty store.
    pub fn new(config: AppConfig, debug_mode: bool) -> Self {
        Self {
            config,
            view: View::default(),
            store: Arc::new(SessionStore::new()),
            records: Vec::new(),
            filtered_indices: Vec::new(),
            filter: SleepFilter::default(),
            filter_inputs: FilterInputs::default(),
            filter_error: None,
            summary: SleepSummary::default(),
            import_in_progress: None,
            last_import: None,
            show_import_report: false,
            status_message: "Ready. Use Import CSV to load a sleep log.".to_string(),
            warnings: Vec::new(),
            chat: ChatState::default(),
            debug_mode,
        }
    }

    /// Importer limits derived from the configuration.
    pub fn import_config(&self) -> ImportConfig {
        ImportConfig {
            max_line_length: self.config.max_line_length,
            max_row_failures: self.config.max_row_failures,
        }
    }

    /// Record a non-fatal warning, bounded by MAX_WARNINGS.
    pub fn push_warning(&mut self, warning: String) {
        if self.warnings.len() < constants::MAX_WARNINGS {
            self.warnings.push(warning);
        }
    }

    /// Apply one UI event.
    pub fn handle_event(&mut self, event: AppEvent, imports: &mut ImportManager) {
        tracing::debug!(event = ?event, "UI event");
        match event {
            AppEvent::ShowDashboard => self.view = View::Dashboard,
            AppEvent::ShowChat => self.view = View::Chat,
            AppEvent::ImportRequested(path) => self.start_import(path, imports),
            AppEvent::CancelImport => {
                if self.import_in_progress.is_some() {
                    imports.cancel_import();
                    self.status_message = "Cancelling import...".to_string();
                }
            }
            AppEvent::ApplyFilter => self.apply_filter_inputs(),
            AppEvent::ClearFilter => {
                self.filter_inputs = FilterInputs::default();
                self.filter_error = None;
                self.filter = SleepFilter::default();
                self.apply_filters();
            }
            AppEvent::ShowShortNights => {
                self.filter_inputs = FilterInputs::default();
                self.filter_error = None;
                self.filter = SleepFilter::short_nights(self.config.short_sleep_hours);
                self.apply_filters();
            }
            AppEvent::SetImportReportVisible(visible) => self.show_import_report = visible,
            AppEvent::ExportRequested { format, path } => {
                self.status_message = match self.export_filtered(format, &path) {
                    Ok(n) => format!("Exported {n} record(s) to {}.", format.label()),
                    Err(e) => {
                        tracing::error!(error = %e, "Export failed");
                        format!("{} export failed: {e}", format.label())
                    }
                };
            }
            AppEvent::ChatSend => self.chat_send(),
        }
    }

    fn start_import(&mut self, path: PathBuf, imports: &mut ImportManager) {
        let job = ImportJob {
            path: path.clone(),
            config: self.import_config(),
            max_file_size: self.config.max_file_size,
        };
        imports.start_import(job, Arc::clone(&self.store));
        self.status_message = format!("Importing {}...", display_name(&path));
        self.import_in_progress = Some(path);
    }

    /// Apply one progress message from the import worker.
    pub fn handle_progress(&mut self, msg: ImportProgress) {
        match msg {
            ImportProgress::Started { path } => {
                self.status_message = format!("Reading {}...", display_name(&path));
            }
            ImportProgress::Completed { path, report } => {
                self.import_in_progress = None;
                self.refresh();
                self.status_message = format!("{}: {}", display_name(&path), report.describe());
                if !report.is_complete() {
                    self.push_warning(format!(
                        "{}: {} invalid row(s)",
                        path.display(),
                        report.failed_rows()
                    ));
                    self.show_import_report = true;
                }
                // Navigate to the dashboard after an import.
                self.view = View::Dashboard;
                self.last_import = Some(ImportOutcome { path, report });
            }
            ImportProgress::Failed { path, error } => {
                self.import_in_progress = None;
                self.status_message = format!("Import failed: {error}");
                self.push_warning(format!("{}: {error}", path.display()));
            }
            ImportProgress::Cancelled { path } => {
                self.import_in_progress = None;
                self.status_message = format!("Import of {} cancelled.", display_name(&path));
            }
        }
    }

    /// Take a fresh snapshot of the store and recompute the view.
    pub fn refresh(&mut self) {
        self.records = self.store.snapshot();
        self.apply_filters();
    }

    /// Recompute filtered indices and summary from the current snapshot.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter::apply_filters(&self.records, &self.filter);
        self.summary = SleepSummary::from_records(
            self.filtered_records(),
            self.config.short_sleep_hours,
            constants::RECENT_WINDOW,
        );
    }

    /// Filtered records in insertion order.
    pub fn filtered_records(&self) -> impl Iterator<Item = &SleepRecord> {
        self.filtered_indices
            .iter()
            .filter_map(|&i| self.records.get(i))
    }

    fn apply_filter_inputs(&mut self) {
        match parse_filter_inputs(&self.filter_inputs) {
            Ok(filter) => {
                self.filter = filter;
                self.filter_error = None;
                self.apply_filters();
            }
            Err(e) => {
                tracing::debug!(error = %e, "Filter input rejected");
                self.filter_error = Some(e.to_string());
            }
        }
    }

    fn export_filtered(&self, format: ExportFormat, path: &Path) -> Result<usize> {
        let records: Vec<SleepRecord> = self.filtered_records().copied().collect();
        let file = std::fs::File::create(path).map_err(|e| SleepLogError::Io {
            path: path.to_path_buf(),
            operation: "create export file",
            source: e,
        })?;
        let writer = std::io::BufWriter::new(file);
        let written = match format {
            ExportFormat::Csv => export::export_csv(&records, writer, path)?,
            ExportFormat::Json => export::export_json(&records, writer, path)?,
        };
        Ok(written)
    }

    /// The chat panel has no assistant behind it: Send only moves the typed
    /// line into the history.
    fn chat_send(&mut self) {
        let text = self.chat.input.trim().to_string();
        self.chat.input.clear();
        if text.is_empty() {
            return;
        }
        if self.chat.history.len() >= constants::MAX_CHAT_HISTORY_LINES {
            self.chat.history.remove(0);
        }
        self.chat.history.push(format!("You: {text}"));
    }
}

fn parse_filter_inputs(inputs: &FilterInputs) -> Result<SleepFilter> {
    Ok(SleepFilter {
        date_start: SleepFilter::parse_date_bound(&inputs.date_start)?,
        date_end: SleepFilter::parse_date_bound(&inputs.date_end)?,
        min_hours: SleepFilter::parse_hours_bound(&inputs.min_hours)?,
        max_hours: SleepFilter::parse_hours_bound(&inputs.max_hours)?,
        below_hours: None,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn state() -> AppState {
        AppState::new(AppConfig::default(), false)
    }

    /// Pump worker messages into state until no import is running.
    fn finish_import(state: &mut AppState, imports: &ImportManager) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while state.import_in_progress.is_some() {
            for msg in imports.poll_progress(16) {
                state.handle_progress(msg);
            }
            assert!(Instant::now() < deadline, "import did not finish in time");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn import_text(state: &mut AppState, imports: &mut ImportManager, dir: &TempDir, name: &str, text: &str) {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        state.handle_event(AppEvent::ImportRequested(path), imports);
        finish_import(state, imports);
    }

    #[test]
    fn test_navigation_events() {
        let mut s = state();
        let mut imports = ImportManager::new();
        s.handle_event(AppEvent::ShowChat, &mut imports);
        assert_eq!(s.view, View::Chat);
        s.handle_event(AppEvent::ShowDashboard, &mut imports);
        assert_eq!(s.view, View::Dashboard);
    }

    #[test]
    fn test_import_accumulates_across_files() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let mut imports = ImportManager::new();

        import_text(&mut s, &mut imports, &dir, "a.csv", "Date,Hours\n2024-01-01,7.5\n2024-01-02,6\n");
        import_text(&mut s, &mut imports, &dir, "b.csv", "Date,Hours\n2024-01-01,5\n");

        let pairs: Vec<_> = s
            .records
            .iter()
            .map(|r| (r.date().to_string(), r.hours_slept()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("2024-01-01".to_string(), 7.5),
                ("2024-01-02".to_string(), 6.0),
                ("2024-01-01".to_string(), 5.0),
            ]
        );
        assert_eq!(s.filtered_indices, vec![0, 1, 2]);
        assert!(!s.show_import_report);
    }

    #[test]
    fn test_partial_import_opens_report() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let mut imports = ImportManager::new();
        s.view = View::Chat;

        import_text(&mut s, &mut imports, &dir, "p.csv", "Date,Hours\n2024-05-01,abc\n2024-05-02,7\n");

        assert!(s.show_import_report);
        assert_eq!(s.view, View::Dashboard);
        let outcome = s.last_import.as_ref().unwrap();
        assert!(outcome.report.is_partial());
        assert_eq!(s.records.len(), 1);
        assert_eq!(s.warnings.len(), 1);
        assert!(s.status_message.contains("1 row(s) were invalid"), "{}", s.status_message);
    }

    #[test]
    fn test_failed_import_is_explained() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let mut imports = ImportManager::new();
        s.handle_event(
            AppEvent::ImportRequested(dir.path().join("missing.csv")),
            &mut imports,
        );
        finish_import(&mut s, &imports);
        assert!(s.status_message.starts_with("Import failed: Cannot read"), "{}", s.status_message);
        assert!(s.records.is_empty());
    }

    #[test]
    fn test_filter_inputs_apply_and_report_errors() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let mut imports = ImportManager::new();
        import_text(
            &mut s,
            &mut imports,
            &dir,
            "f.csv",
            "Date,Hours\n2024-01-01,7.5\n2024-01-02,5\n2024-01-03,8\n",
        );

        s.filter_inputs.date_start = "2024-01-02".to_string();
        s.handle_event(AppEvent::ApplyFilter, &mut imports);
        assert_eq!(s.filtered_indices, vec![1, 2]);
        assert_eq!(s.summary.count, 2);

        s.filter_inputs.min_hours = "many".to_string();
        s.handle_event(AppEvent::ApplyFilter, &mut imports);
        assert!(s.filter_error.is_some());
        assert_eq!(s.filtered_indices, vec![1, 2], "bad input keeps the previous filter");

        s.handle_event(AppEvent::ShowShortNights, &mut imports);
        assert_eq!(s.filtered_indices, vec![1]);

        s.handle_event(AppEvent::ClearFilter, &mut imports);
        assert_eq!(s.filtered_indices, vec![0, 1, 2]);
        assert!(s.filter_error.is_none());
    }

    #[test]
    fn test_export_writes_filtered_records() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let mut imports = ImportManager::new();
        import_text(&mut s, &mut imports, &dir, "e.csv", "Date,Hours\n2024-01-01,7.5\n2024-01-02,5\n");

        s.handle_event(AppEvent::ShowShortNights, &mut imports);
        let out = dir.path().join("out.csv");
        s.handle_event(
            AppEvent::ExportRequested {
                format: ExportFormat::Csv,
                path: out.clone(),
            },
            &mut imports,
        );
        assert_eq!(s.status_message, "Exported 1 record(s) to CSV.");
        let text = std::fs::read_to_string(out).unwrap();
        assert!(text.contains("2024-01-02,5"));
        assert!(!text.contains("2024-01-01"));
    }

    #[test]
    fn test_export_to_missing_directory_explains_failure() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let mut imports = ImportManager::new();
        import_text(&mut s, &mut imports, &dir, "x.csv", "Date,Hours\n2024-01-01,7\n");

        let out = dir.path().join("no_such_dir").join("out.json");
        s.handle_event(
            AppEvent::ExportRequested {
                format: ExportFormat::Json,
                path: out.clone(),
            },
            &mut imports,
        );
        assert!(
            s.status_message
                .starts_with("JSON export failed: I/O error during create export file"),
            "{}",
            s.status_message
        );
        assert!(!out.exists());
    }

    #[test]
    fn test_non_finite_hours_bound_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut s = state();
        let mut imports = ImportManager::new();
        import_text(&mut s, &mut imports, &dir, "n.csv", "Date,Hours\n2024-01-01,7.5\n2024-01-02,5\n");

        s.filter_inputs.max_hours = "6".to_string();
        s.handle_event(AppEvent::ApplyFilter, &mut imports);
        assert_eq!(s.filtered_indices, vec![1]);

        s.filter_inputs.min_hours = "NaN".to_string();
        s.filter_inputs.max_hours = "NaN".to_string();
        s.handle_event(AppEvent::ApplyFilter, &mut imports);
        assert_eq!(
            s.filter_error.as_deref(),
            Some("Filter error: Invalid hours bound 'NaN', must be a finite number")
        );
        assert_eq!(s.filtered_indices, vec![1], "previous filter stays active");
    }

    #[test]
    fn test_chat_send_only_records_input() {
        let mut s = state();
        let mut imports = ImportManager::new();
        s.chat.input = "  hello  ".to_string();
        s.handle_event(AppEvent::ChatSend, &mut imports);
        assert_eq!(s.chat.history, vec!["You: hello".to_string()]);
        assert!(s.chat.input.is_empty());

        s.handle_event(AppEvent::ChatSend, &mut imports);
        assert_eq!(s.chat.history.len(), 1, "blank input is ignored");
    }
}
