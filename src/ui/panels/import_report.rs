// SleepLog - ui/panels/import_report.rs
//
// Import report window: what the last import read, and every row that was
// rejected with its line number. Session warnings are listed below.

use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::ui::theme;

/// Render the import report dialog (if `state.show_import_report` is true).
pub fn render(ctx: &egui::Context, state: &AppState, events: &mut Vec<AppEvent>) {
    if !state.show_import_report {
        return;
    }

    let mut open = true;
    let mut close_clicked = false;
    egui::Window::new("Import Report")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            if let Some(ref outcome) = state.last_import {
                let report = &outcome.report;

                ui.strong("Overview");
                egui::Grid::new("import_overview")
                    .num_columns(2)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("File:");
                        ui.label(
                            egui::RichText::new(outcome.path.display().to_string()).monospace(),
                        );
                        ui.end_row();

                        ui.label("Lines read:");
                        ui.label(report.lines_processed.to_string());
                        ui.end_row();

                        ui.label("Records imported:");
                        ui.label(report.records.len().to_string());
                        ui.end_row();

                        ui.label("Invalid rows:");
                        let colour = if report.failed_rows() > 0 {
                            theme::ERROR_TEXT
                        } else {
                            ui.style().visuals.text_color()
                        };
                        ui.colored_label(colour, report.failed_rows().to_string());
                        ui.end_row();

                        ui.label("Blank lines skipped:");
                        ui.label(report.blank_lines_skipped.to_string());
                        ui.end_row();
                    });

                ui.add_space(4.0);
                ui.label(report.describe());

                if !report.failures.is_empty() {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.strong("Rejected rows");

                    egui::ScrollArea::vertical()
                        .id_salt("import_failures")
                        .max_height(260.0)
                        .show(ui, |ui| {
                            egui::Grid::new("import_failure_table")
                                .num_columns(2)
                                .striped(true)
                                .spacing([12.0, 3.0])
                                .show(ui, |ui| {
                                    ui.strong("Line");
                                    ui.strong("Problem");
                                    ui.end_row();

                                    for failure in &report.failures {
                                        ui.label(
                                            egui::RichText::new(failure.line_number.to_string())
                                                .monospace(),
                                        );
                                        ui.label(failure.error.to_string());
                                        ui.end_row();
                                    }
                                });
                        });

                    if report.suppressed_failures > 0 {
                        ui.label(
                            egui::RichText::new(format!(
                                "\u{2026}and {} more invalid row(s) not listed.",
                                report.suppressed_failures
                            ))
                            .weak(),
                        );
                    }
                }
            } else {
                ui.label("No import has been completed yet.");
            }

            if !state.warnings.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong(format!("Warnings ({})", state.warnings.len()));

                egui::ScrollArea::vertical()
                    .id_salt("import_warnings")
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for warn in &state.warnings {
                            ui.label(
                                egui::RichText::new(warn)
                                    .color(egui::Color32::from_rgb(253, 186, 116))
                                    .size(11.5),
                            );
                        }
                    });
            }

            ui.add_space(8.0);
            ui.separator();
            if ui.button("Close").clicked() {
                close_clicked = true;
            }
        });

    if !open || close_clicked {
        events.push(AppEvent::SetImportReportVisible(false));
    }
}
