// SleepLog - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the panels, drains import progress each frame and
// dispatches panel events to `AppState`.

use crate::app::event::{AppEvent, ExportFormat, View};
use crate::app::import::ImportManager;
use crate::app::state::AppState;
use crate::ui;
use crate::util::constants;

/// The SleepLog application.
pub struct SleepLogApp {
    pub state: AppState,
    pub import_manager: ImportManager,
}

impl SleepLogApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            import_manager: ImportManager::new(),
        }
    }

    /// Apply an event outside of a frame (e.g. a CLI import at startup).
    pub fn dispatch(&mut self, event: AppEvent) {
        self.state.handle_event(event, &mut self.import_manager);
    }
}

impl eframe::App for SleepLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll for import progress; a bounded batch per frame.
        let messages = self
            .import_manager
            .poll_progress(constants::MAX_IMPORT_MESSAGES_PER_FRAME);
        let had_messages = !messages.is_empty();
        for msg in messages {
            self.state.handle_progress(msg);
        }
        // Repaint while importing so the outcome appears promptly.
        if had_messages || self.state.import_in_progress.is_some() {
            ctx.request_repaint();
        }

        let mut events: Vec<AppEvent> = Vec::new();

        // Top menu bar and navigation
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let importing = self.state.import_in_progress.is_some();
                    if ui
                        .add_enabled(!importing, egui::Button::new("Import CSV\u{2026}"))
                        .clicked()
                    {
                        if let Some(path) = ui::panels::nav::pick_import_file() {
                            events.push(AppEvent::ImportRequested(path));
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    // Export sub-menu -- enabled only when there are filtered records
                    let has_records = !self.state.filtered_indices.is_empty();
                    ui.add_enabled_ui(has_records, |ui| {
                        ui.menu_button("Export", |ui| {
                            for format in [ExportFormat::Csv, ExportFormat::Json] {
                                if ui.button(format!("Export {}...", format.label())).clicked() {
                                    if let Some(path) = rfd::FileDialog::new()
                                        .add_filter(format.label(), &[format.extension()])
                                        .set_file_name(format!("sleep.{}", format.extension()))
                                        .save_file()
                                    {
                                        events.push(AppEvent::ExportRequested { format, path });
                                    }
                                    ui.close_menu();
                                }
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Dashboard").clicked() {
                        events.push(AppEvent::ShowDashboard);
                        ui.close_menu();
                    }
                    if ui.button("Chatbot").clicked() {
                        events.push(AppEvent::ShowChat);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Import Report").clicked() {
                        events.push(AppEvent::SetImportReportVisible(true));
                        ui.close_menu();
                    }
                });
            });
            ui::panels::nav::render(ui, &self.state, &mut events);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.records.len();
                    let shown = self.state.filtered_indices.len();
                    if total > 0 {
                        ui.label(format!("{shown}/{total} records"));
                    }
                    if self.state.debug_mode {
                        ui.label(egui::RichText::new("DEBUG").small().weak());
                    }
                });
            });
        });

        // Central panel
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Dashboard => ui::panels::dashboard::render(ui, &mut self.state, &mut events),
            View::Chat => ui::panels::chat::render(ui, &mut self.state, &mut events),
        });

        ui::panels::import_report::render(ctx, &self.state, &mut events);

        let had_events = !events.is_empty();
        for event in events {
            self.dispatch(event);
        }
        if had_events {
            ctx.request_repaint();
        }
    }

    /// Stop any running import when the window closes.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.import_manager.cancel_import();
    }
}
