// SleepLog - ui/panels/dashboard.rs
//
// Dashboard: summary cards, filter controls, and the record table.
//
// The table uses `ScrollArea::show_rows`, which lays out only the rows in
// the viewport. Rows are shown in insertion order; nights below the
// short-sleep threshold get a tinted background.

use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::core::summary::SleepSummary;
use crate::ui::theme;
use crate::util::constants;

/// Render the dashboard (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState, events: &mut Vec<AppEvent>) {
    ui.heading("Sleep Data");
    ui.add_space(4.0);

    render_cards(ui, &state.summary);
    ui.add_space(6.0);
    ui.separator();

    render_filters(ui, state, events);
    ui.separator();

    render_table(ui, state);
}

// =============================================================================
// Summary cards
// =============================================================================

fn render_cards(ui: &mut egui::Ui, summary: &SleepSummary) {
    let hours = |h: Option<f64>| h.map_or_else(|| "--".to_string(), |h| format!("{h:.1} h"));
    let range = match (summary.earliest, summary.latest) {
        (Some(e), Some(l)) if e == l => e.format(constants::DATE_FORMAT).to_string(),
        (Some(e), Some(l)) => format!(
            "{} \u{2013} {}",
            e.format(constants::DATE_FORMAT),
            l.format(constants::DATE_FORMAT)
        ),
        _ => "--".to_string(),
    };

    ui.horizontal_wrapped(|ui| {
        card(ui, "Nights", summary.count.to_string());
        card(ui, "Average", hours(summary.average_hours));
        card(
            ui,
            &format!("Last {} avg", constants::RECENT_WINDOW),
            hours(summary.recent_average),
        );
        card(ui, "Shortest", hours(summary.min_hours));
        card(ui, "Longest", hours(summary.max_hours));
        card(ui, "Short nights", summary.short_nights.to_string());
        card(ui, "Dates", range);
    });
}

fn card(ui: &mut egui::Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(theme::CARD_WIDTH);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(title).small().weak());
            ui.label(
                egui::RichText::new(value)
                    .size(18.0)
                    .strong()
                    .color(theme::CARD_ACCENT),
            );
        });
    });
}

// =============================================================================
// Filters
// =============================================================================

fn render_filters(ui: &mut egui::Ui, state: &mut AppState, events: &mut Vec<AppEvent>) {
    let mut submitted = false;

    ui.horizontal_wrapped(|ui| {
        let inputs = &mut state.filter_inputs;
        let mut field = |ui: &mut egui::Ui, label: &str, text: &mut String, hint: &str| {
            ui.label(label);
            let response = ui.add(
                egui::TextEdit::singleline(text)
                    .hint_text(hint)
                    .desired_width(theme::FILTER_INPUT_WIDTH),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                submitted = true;
            }
        };
        field(ui, "From:", &mut inputs.date_start, "YYYY-MM-DD");
        field(ui, "To:", &mut inputs.date_end, "YYYY-MM-DD");
        field(ui, "Min hours:", &mut inputs.min_hours, "0");
        field(ui, "Max hours:", &mut inputs.max_hours, "24");
    });

    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() {
            submitted = true;
        }
        if ui.button("Clear Filters").clicked() {
            events.push(AppEvent::ClearFilter);
        }
        let label = format!("Short nights (< {} h)", state.config.short_sleep_hours);
        if ui.button(label).clicked() {
            events.push(AppEvent::ShowShortNights);
        }
    });

    if submitted {
        events.push(AppEvent::ApplyFilter);
    }

    if let Some(ref err) = state.filter_error {
        ui.colored_label(theme::ERROR_TEXT, err);
    }
}

// =============================================================================
// Record table
// =============================================================================

fn render_table(ui: &mut egui::Ui, state: &AppState) {
    let filtered = state.filtered_indices.len();

    if filtered == 0 {
        ui.centered_and_justified(|ui| {
            if state.records.is_empty() {
                ui.label("No sleep data loaded.\nUse Import CSV\u{2026} to load a sleep log.");
            } else {
                ui.label("No records match the current filters.");
            }
        });
        return;
    }

    let dark_mode = ui.visuals().dark_mode;
    let text_colour = ui.visuals().text_color();
    let font = egui::FontId::monospace(13.0);

    ui.horizontal(|ui| {
        ui.add_sized(
            [theme::DATE_COLUMN_WIDTH, theme::ROW_HEIGHT],
            egui::Label::new(egui::RichText::new("Date").strong()),
        );
        ui.label(egui::RichText::new("Hours Slept").strong());
    });

    egui::ScrollArea::vertical()
        .id_salt("records_table")
        .auto_shrink([false; 2])
        .show_rows(ui, theme::ROW_HEIGHT, filtered, |ui, row_range| {
            for display_idx in row_range {
                let Some(record) = state
                    .filtered_indices
                    .get(display_idx)
                    .and_then(|&i| state.records.get(i))
                else {
                    continue;
                };

                let short = record.hours_slept() < state.config.short_sleep_hours;
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), theme::ROW_HEIGHT),
                    egui::Sense::hover(),
                );
                if short {
                    ui.painter()
                        .rect_filled(rect, 0.0, theme::short_night_bg(dark_mode));
                }

                let painter = ui.painter();
                painter.text(
                    rect.left_center() + egui::vec2(6.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    record.date().format(constants::DATE_FORMAT).to_string(),
                    font.clone(),
                    text_colour,
                );
                painter.text(
                    rect.left_center() + egui::vec2(theme::DATE_COLUMN_WIDTH, 0.0),
                    egui::Align2::LEFT_CENTER,
                    record.hours_slept().to_string(),
                    font.clone(),
                    if short {
                        theme::short_night_text(dark_mode)
                    } else {
                        text_colour
                    },
                );
            }
        });
}
