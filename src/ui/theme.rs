// SleepLog - ui/theme.rs
//
// Colour scheme, short-night highlighting, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Apply the configured theme and body font size to the context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    let mut style = (*ctx.style()).clone();
    for (text_style, font_id) in style.text_styles.iter_mut() {
        match text_style {
            egui::TextStyle::Body | egui::TextStyle::Button | egui::TextStyle::Monospace => {
                font_id.size = font_size;
            }
            egui::TextStyle::Small => font_id.size = (font_size - 3.0).max(8.0),
            egui::TextStyle::Heading => font_id.size = font_size + 6.0,
            _ => {}
        }
    }
    ctx.set_style(style);
}

/// Row background for a night below the short-sleep threshold.
pub fn short_night_bg(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_premultiplied(217, 119, 6, 28) // Amber 600
    } else {
        Color32::from_rgba_premultiplied(245, 158, 11, 40) // Amber 500
    }
}

/// Hours text colour for a short night.
pub fn short_night_text(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(253, 186, 116) // Orange 300
    } else {
        Color32::from_rgb(180, 83, 9) // Amber 700
    }
}

/// Colour for error text in dialogs and under filter inputs.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Accent for the summary card figures.
pub const CARD_ACCENT: Color32 = Color32::from_rgb(96, 165, 250); // Blue 400

/// Layout constants.
pub const ROW_HEIGHT: f32 = 22.0;
pub const DATE_COLUMN_WIDTH: f32 = 140.0;
pub const CARD_WIDTH: f32 = 150.0;
pub const FILTER_INPUT_WIDTH: f32 = 100.0;
pub const CHAT_INPUT_HEIGHT: f32 = 36.0;
