// SleepLog - ui/panels/nav.rs
//
// Navigation bar: view switching and the Import CSV button.

use crate::app::event::{AppEvent, View};
use crate::app::state::AppState;
use crate::util::constants;

/// Render the navigation row. Actions are pushed onto `events`.
pub fn render(ui: &mut egui::Ui, state: &AppState, events: &mut Vec<AppEvent>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(constants::APP_NAME).strong());
        ui.separator();

        if ui
            .selectable_label(state.view == View::Dashboard, "Dashboard")
            .clicked()
        {
            events.push(AppEvent::ShowDashboard);
        }
        if ui
            .selectable_label(state.view == View::Chat, "Chatbot")
            .clicked()
        {
            events.push(AppEvent::ShowChat);
        }

        ui.separator();

        let importing = state.import_in_progress.is_some();
        if ui
            .add_enabled(!importing, egui::Button::new("Import CSV\u{2026}"))
            .clicked()
        {
            if let Some(path) = pick_import_file() {
                events.push(AppEvent::ImportRequested(path));
            }
        }
        if importing {
            ui.spinner();
            if ui.small_button("Cancel").clicked() {
                events.push(AppEvent::CancelImport);
            }
        }
    });
}

/// Show the native open dialog filtered to sleep log files.
pub fn pick_import_file() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Import sleep log")
        .add_filter("CSV files", constants::IMPORT_EXTENSIONS)
        .pick_file()
}
