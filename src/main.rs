// SleepLog - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading (config.toml)
// 3. Logging initialisation (debug mode support)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use sleeplog::app;

pub use sleeplog::core;
pub use sleeplog::platform;
pub use sleeplog::ui;
pub use sleeplog::util;

use clap::Parser;
use std::path::PathBuf;

/// SleepLog - Desktop sleep-log dashboard.
///
/// Import CSV files of nightly sleep hours and review them in a
/// filterable table with summary statistics.
#[derive(Parser, Debug)]
#[command(name = "SleepLog", version, about)]
struct Cli {
    /// Sleep log CSV to import at startup.
    path: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so `[logging] level` can take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %platform_paths.config_dir.display(),
        "SleepLog starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    let dark_mode = config.dark_mode;
    let font_size = config.font_size;

    let mut state = app::state::AppState::new(config, cli.debug);
    for warning in config_warnings {
        state.push_warning(warning);
    }

    let mut sleep_app = gui::SleepLogApp::new(state);

    // If a path was provided on the CLI, import it straight away.
    if let Some(path) = cli.path {
        sleep_app.dispatch(app::event::AppEvent::ImportRequested(path));
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(sleep_app))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch SleepLog GUI: {e}");
        std::process::exit(1);
    }
}
