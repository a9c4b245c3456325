// SleepLog - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SleepLog configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/sleeplog/ or %APPDATA%\SleepLog\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[import]` section.
    pub import: ImportSection,
    /// `[dashboard]` section.
    pub dashboard: DashboardSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[import]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ImportSection {
    /// Largest file accepted for import.
    pub max_file_size_bytes: Option<u64>,
    /// Longest data line accepted.
    pub max_line_length: Option<usize>,
    /// Row failures kept in detail per import.
    pub max_row_failures: Option<usize>,
}

/// `[dashboard]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DashboardSection {
    /// Nights below this many hours count as short.
    pub short_sleep_hours: Option<f64>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Import --
    pub max_file_size: u64,
    pub max_line_length: usize,
    pub max_row_failures: usize,

    // -- Dashboard --
    pub short_sleep_hours: f64,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    pub font_size: f32,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_file_size: constants::DEFAULT_MAX_FILE_SIZE,
            max_line_length: constants::DEFAULT_MAX_LINE_LENGTH,
            max_row_failures: constants::DEFAULT_MAX_ROW_FAILURES,
            short_sleep_hours: constants::DEFAULT_SHORT_SLEEP_HOURS,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
        }
    }
}

/// Path of config.toml inside the given config directory.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::CONFIG_FILE_NAME)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning; the
/// application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_path(config_dir);
    let mut warnings: Vec<String> = Vec::new();

    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: path.clone(),
                source: e,
            };
            tracing::warn!(error = %err, "Using default configuration");
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: path.clone(),
                source: e,
            };
            tracing::warn!(error = %err, "Using default configuration");
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

/// Check every present field against its named range, accumulating all
/// problems rather than stopping at the first.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    let mut out_of_range = |field: &str, value: String, expected: String| {
        let err = ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value,
            expected,
        };
        warnings.push(format!("{err}. Using default."));
    };

    // -- Import: max_file_size_bytes --
    if let Some(size) = raw.import.max_file_size_bytes {
        if (constants::MIN_MAX_FILE_SIZE..=constants::ABSOLUTE_MAX_FILE_SIZE).contains(&size) {
            config.max_file_size = size;
        } else {
            out_of_range(
                "import.max_file_size_bytes",
                size.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_MAX_FILE_SIZE,
                    constants::ABSOLUTE_MAX_FILE_SIZE
                ),
            );
        }
    }

    // -- Import: max_line_length --
    if let Some(len) = raw.import.max_line_length {
        if (constants::MIN_MAX_LINE_LENGTH..=constants::ABSOLUTE_MAX_LINE_LENGTH).contains(&len) {
            config.max_line_length = len;
        } else {
            out_of_range(
                "import.max_line_length",
                len.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_MAX_LINE_LENGTH,
                    constants::ABSOLUTE_MAX_LINE_LENGTH
                ),
            );
        }
    }

    // -- Import: max_row_failures --
    if let Some(n) = raw.import.max_row_failures {
        if (1..=constants::ABSOLUTE_MAX_ROW_FAILURES).contains(&n) {
            config.max_row_failures = n;
        } else {
            out_of_range(
                "import.max_row_failures",
                n.to_string(),
                format!("1-{}", constants::ABSOLUTE_MAX_ROW_FAILURES),
            );
        }
    }

    // -- Dashboard: short_sleep_hours --
    if let Some(hours) = raw.dashboard.short_sleep_hours {
        if (constants::MIN_HOURS_SLEPT..=constants::MAX_HOURS_SLEPT).contains(&hours) {
            config.short_sleep_hours = hours;
        } else {
            out_of_range(
                "dashboard.short_sleep_hours",
                hours.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_HOURS_SLEPT,
                    constants::MAX_HOURS_SLEPT
                ),
            );
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => out_of_range("ui.theme", other.to_string(), "\"dark\" or \"light\"".to_string()),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            out_of_range(
                "ui.font_size",
                size.to_string(),
                format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            );
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            out_of_range(
                "logging.level",
                level.clone(),
                "error, warn, info, debug, trace".to_string(),
            );
        }
    }

    config
}
