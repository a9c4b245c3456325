// SleepLog - app/event.rs
//
// Messages from the UI layer to the application layer.
// Panels never mutate import or store state directly; they emit events
// and `AppState::handle_event` applies them.

use std::path::PathBuf;

/// Which panel fills the central area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Chat,
}

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// A user action forwarded from a panel.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Navigate to the dashboard panel.
    ShowDashboard,

    /// Navigate to the chat panel.
    ShowChat,

    /// The user chose a file to import.
    ImportRequested(PathBuf),

    /// Stop the running import.
    CancelImport,

    /// Re-read the filter text inputs and apply them.
    ApplyFilter,

    /// Reset every filter bound.
    ClearFilter,

    /// Quick filter: nights below the short-sleep threshold.
    ShowShortNights,

    /// Open or close the import report window.
    SetImportReportVisible(bool),

    /// Write the filtered records to `path`.
    ExportRequested { format: ExportFormat, path: PathBuf },

    /// The chat Send button was pressed.
    ChatSend,
}
