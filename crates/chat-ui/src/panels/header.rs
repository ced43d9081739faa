//! Top bar: app title, greeting and logout.

use egui::{self, Align, Layout, RichText};
use crate::theme::*;

pub enum HeaderAction {
    None,
    Logout,
}

pub fn header_bar(ui: &mut egui::Ui, username: Option<&str>) -> HeaderAction {
    let mut action = HeaderAction::None;

    egui::Frame::default()
        .fill(BG_SECONDARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.heading(RichText::new("Agent Chat").color(TEXT_PRIMARY).strong());

                let Some(username) = username else {
                    return;
                };
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui
                        .button(RichText::new("Log out").color(TEXT_PRIMARY))
                        .clicked()
                    {
                        action = HeaderAction::Logout;
                    }
                    ui.label(
                        RichText::new(format!("Hello, {}", username)).color(TEXT_SECONDARY),
                    );
                });
            });
        });

    action
}
