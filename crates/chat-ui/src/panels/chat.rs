//! Conversation screen: agent header, message log and composer.

use egui::{self, Align, Layout, RichText, ScrollArea, Sense, Vec2};
use chat_types::{
    agent::AgentDescriptor,
    message::{Message, Sender},
};
use crate::markdown::plain_text;
use crate::state::UiState;
use crate::theme::*;

pub enum ChatAction {
    None,
    Send(String),
    Back,
    Clear,
}

/// Local time of day for an RFC 3339 timestamp; empty when unparseable.
pub fn time_of_day(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Text shown in a bubble. Bot replies are markdown and shown without markup.
pub fn display_text(message: &Message) -> String {
    let text = match message.sender {
        Sender::Bot if !message.is_typing() => plain_text(&message.text),
        _ => message.text.clone(),
    };
    if message.flags.is_simulated {
        format!("{} (simulated)", text)
    } else {
        text
    }
}

pub fn empty_hint(agent: &AgentDescriptor) -> String {
    format!("Send a message to start the conversation with {}.", agent.name)
}

/// Render the conversation. Returns what the user asked for this frame.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, agent: &AgentDescriptor) -> ChatAction {
    let mut action = ChatAction::None;
    let now = ui.input(|i| i.time);

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    if ui.button("← Back").clicked() {
                        action = ChatAction::Back;
                    }
                    ui.label(RichText::new(&agent.icon).size(22.0));
                    ui.heading(RichText::new(&agent.name).color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Clear").clicked() {
                            action = ChatAction::Clear;
                        }
                        let status_color = if state.pending { WARNING } else { SUCCESS };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                let available_height = ui.available_height() - 90.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if state.messages.is_empty() {
                            ui.add_space(24.0);
                            ui.vertical_centered(|ui| {
                                ui.label(RichText::new(empty_hint(agent)).color(TEXT_SECONDARY));
                            });
                        }

                        let mut copied = None;
                        for message in &state.messages {
                            let is_copied = state.is_copied(&message.id, now);
                            if render_message(ui, message, is_copied) {
                                ui.ctx().copy_text(plain_text(&message.text));
                                copied = Some(message.id.clone());
                            }
                            ui.add_space(4.0);
                        }
                        if let Some(id) = copied {
                            state.mark_copied(&id, now);
                        }
                    });

                ui.add_space(8.0);

                ui.horizontal(|ui| {
                    let input = egui::TextEdit::multiline(&mut state.input_text)
                        .hint_text(agent.placeholder.as_str())
                        .desired_rows(2)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));
                    let response = ui.add(input);

                    let send_btn = ui.add_enabled(
                        state.can_send(),
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if state.can_send() { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    let shortcut = response.has_focus()
                        && ui.input(|i| {
                            (i.modifiers.command || i.modifiers.ctrl)
                                && i.key_pressed(egui::Key::Enter)
                        });
                    if send_btn.clicked() || shortcut {
                        if let Some(text) = state.take_input() {
                            action = ChatAction::Send(text);
                            response.request_focus();
                        }
                    }
                });
                ui.label(
                    RichText::new("Ctrl+Enter to send")
                        .color(TEXT_SECONDARY)
                        .small(),
                );
            });
        });

    if state.expire_copied(now) {
        ui.ctx().request_repaint_after(std::time::Duration::from_millis(250));
    }

    action
}

/// Draw one bubble. Returns true when a bot reply was clicked to copy.
fn render_message(ui: &mut egui::Ui, message: &Message, is_copied: bool) -> bool {
    let is_user = message.sender == Sender::User;
    let (bg, name_color) = if message.is_typing() {
        (TYPING_BUBBLE, TEXT_SECONDARY)
    } else if message.is_error() {
        (ERROR_BUBBLE, ERROR)
    } else if is_user {
        (USER_BUBBLE, TEXT_PRIMARY)
    } else {
        (BOT_BUBBLE, SUCCESS)
    };
    let layout = if is_user {
        Layout::right_to_left(Align::Min)
    } else {
        Layout::left_to_right(Align::Min)
    };
    let max_width = ui.available_width() * BUBBLE_MAX_WIDTH;
    let copyable = !is_user && !message.is_typing();

    let mut clicked = false;
    ui.with_layout(layout, |ui| {
        let bubble = egui::Frame::default()
            .fill(bg)
            .corner_radius(BUBBLE_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    let who = if is_user { "You" } else { "Agent" };
                    ui.label(RichText::new(who).color(name_color).strong().small());
                    let text = RichText::new(display_text(message)).color(TEXT_PRIMARY);
                    ui.label(if message.is_typing() { text.italics() } else { text });
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(time_of_day(&message.timestamp))
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                        if is_copied {
                            ui.label(RichText::new("Text copied").color(SUCCESS).small());
                        }
                    });
                });
            })
            .response;

        if copyable {
            let bubble = bubble
                .interact(Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .on_hover_text("Click to copy");
            clicked = bubble.clicked();
        }
    });
    clicked
}
