// SleepLog - ui/panels/chat.rs
//
// Chat panel: read-only history, single-line input and a Send button.
// There is no assistant behind it; Send only files the typed line.

use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::ui::theme;

/// Render the chat panel (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState, events: &mut Vec<AppEvent>) {
    ui.heading("Chatbot");
    ui.add_space(4.0);

    let history_height = (ui.available_height() - theme::CHAT_INPUT_HEIGHT - 12.0).max(60.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        egui::ScrollArea::vertical()
            .id_salt("chat_history")
            .max_height(history_height)
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if state.chat.history.is_empty() {
                    ui.label(egui::RichText::new("No messages yet.").weak());
                }
                for line in &state.chat.history {
                    ui.label(line);
                }
            });
    });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let input = ui.add(
            egui::TextEdit::singleline(&mut state.chat.input)
                .hint_text("Type a message")
                .desired_width(ui.available_width() - 70.0),
        );
        let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Send").clicked() || entered {
            events.push(AppEvent::ChatSend);
            input.request_focus();
        }
    });
}
