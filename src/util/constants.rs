// SleepLog - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Every configurable bound has a default and a hard range here.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SleepLog";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "SleepLog";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Import limits
// =============================================================================

/// Maximum size of a sleep log file accepted for import.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MiB

/// Smallest configurable import size limit.
pub const MIN_MAX_FILE_SIZE: u64 = 1024; // 1 KiB

/// Hard upper bound on the import size limit.
pub const ABSOLUTE_MAX_FILE_SIZE: u64 = 512 * 1024 * 1024; // 512 MiB

/// Maximum length of a single data line in bytes. Longer lines are
/// reported as row failures without being parsed.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 4 * 1024;

/// Smallest configurable line length. `YYYY-MM-DD,H` already needs 12.
pub const MIN_MAX_LINE_LENGTH: usize = 16;

/// Hard upper bound on the line length limit.
pub const ABSOLUTE_MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Maximum number of row failures kept with full detail in a single
/// import report. Further failures are only counted.
pub const DEFAULT_MAX_ROW_FAILURES: usize = 1_000;

/// Hard upper bound on tracked row failures.
pub const ABSOLUTE_MAX_ROW_FAILURES: usize = 100_000;

/// Date format of the first column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field separator of the import format.
pub const FIELD_SEPARATOR: char = ',';

/// Number of fields in every data row.
pub const FIELDS_PER_ROW: usize = 2;

/// Smallest valid hours-slept value.
pub const MIN_HOURS_SLEPT: f64 = 0.0;

/// Largest valid hours-slept value (one calendar day).
pub const MAX_HOURS_SLEPT: f64 = 24.0;

/// File dialog extension filter for the import picker.
pub const IMPORT_EXTENSIONS: &[&str] = &["csv", "txt"];

// =============================================================================
// Dashboard defaults
// =============================================================================

/// Nights shorter than this are counted and tinted as short sleep.
pub const DEFAULT_SHORT_SLEEP_HOURS: f64 = 6.0;

/// Number of most recent records averaged for the "last week" card.
pub const RECENT_WINDOW: usize = 7;

/// Maximum number of non-fatal warnings kept for the status area.
pub const MAX_WARNINGS: usize = 1_000;

/// Maximum number of import-progress messages processed per UI frame.
pub const MAX_IMPORT_MESSAGES_PER_FRAME: usize = 64;

/// Maximum number of chat lines kept in the inert chat history.
pub const MAX_CHAT_HISTORY_LINES: usize = 500;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Maximum length of an input line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 120;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
