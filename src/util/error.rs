// SleepLog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation out of the core layer.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for application-level operations that combine
/// several subsystems (applying filters, writing exports).
/// Import and config failures are reported through their own enums.
#[derive(Debug)]
pub enum SleepLogError {
    /// Filter input could not be interpreted.
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for SleepLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SleepLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Import errors
// ---------------------------------------------------------------------------

/// Failures that stop an import as a whole. Row-level problems are
/// reported through [`RowError`] inside an import report instead.
#[derive(Debug)]
pub enum ImportError {
    /// The source could not be opened or read.
    SourceUnreadable {
        path: PathBuf,
        line_number: Option<u64>,
        source: io::Error,
    },

    /// The source exceeds the maximum accepted size.
    SourceTooLarge { path: PathBuf, size: u64, max: u64 },

    /// The caller cancelled the import before it finished.
    Cancelled { lines_read: u64 },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnreadable {
                path,
                line_number: Some(line),
                source,
            } => write!(
                f,
                "Cannot read '{}' at line {line}: {source}",
                path.display()
            ),
            Self::SourceUnreadable {
                path,
                line_number: None,
                source,
            } => write!(f, "Cannot read '{}': {source}", path.display()),
            Self::SourceTooLarge { path, size, max } => write!(
                f,
                "'{}' is {size} bytes, exceeds the import limit of {max} bytes",
                path.display()
            ),
            Self::Cancelled { lines_read } => {
                write!(f, "Import cancelled after {lines_read} lines")
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceUnreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Row errors
// ---------------------------------------------------------------------------

/// Why a single data row could not become a record.
#[derive(Debug, Clone, PartialEq)]
pub enum RowError {
    /// The row did not split into exactly two fields.
    ColumnCount { found: usize, expected: usize },

    /// The date field is not a valid `YYYY-MM-DD` calendar date.
    InvalidDate { raw: String },

    /// The hours field is not a finite decimal number.
    InvalidHours { raw: String },

    /// The hours field parsed but lies outside the valid range.
    HoursOutOfRange { value: f64, min: f64, max: f64 },

    /// The line is not valid UTF-8.
    InvalidEncoding,

    /// The line exceeds the configured maximum length.
    LineTooLong { length: usize, max: usize },
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnCount { found, expected } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Self::InvalidDate { raw } => {
                write!(f, "invalid date '{raw}', expected YYYY-MM-DD")
            }
            Self::InvalidHours { raw } => {
                write!(f, "invalid hours value '{raw}', must be a number")
            }
            Self::HoursOutOfRange { value, min, max } => {
                write!(f, "hours {value} out of range, must be between {min} and {max}")
            }
            Self::InvalidEncoding => f.write_str("line is not valid UTF-8"),
            Self::LineTooLong { length, max } => {
                write!(f, "line is {length} bytes, exceeds maximum of {max}")
            }
        }
    }
}

impl std::error::Error for RowError {}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors interpreting user-typed filter bounds.
#[derive(Debug)]
pub enum FilterError {
    /// A date bound is not `YYYY-MM-DD`.
    InvalidDate { input: String },

    /// An hours bound is not a finite number.
    InvalidHours { input: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate { input } => {
                write!(f, "Invalid date bound '{input}', expected YYYY-MM-DD")
            }
            Self::InvalidHours { input } => {
                write!(f, "Invalid hours bound '{input}', must be a finite number")
            }
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for SleepLogError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for SleepLogError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for SleepLog results.
pub type Result<T> = std::result::Result<T, SleepLogError>;
