//! Identity entry screen.

use egui::{self, RichText, Vec2};
use crate::state::UiState;
use crate::theme::*;

/// Render the login form. Returns the raw input when the user submits;
/// validation and trimming happen in the identity store.
pub fn login_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<String> {
    let mut submitted = None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.2);
        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_max_width(360.0);
                ui.heading(RichText::new("Welcome").color(TEXT_PRIMARY).strong());
                ui.label(
                    RichText::new("Sign in to talk to our specialised agents")
                        .color(TEXT_SECONDARY),
                );
                ui.add_space(12.0);

                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.login_input)
                        .hint_text("Name or e-mail")
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    state.login_error = None;
                }

                if let Some(error) = &state.login_error {
                    ui.label(RichText::new(error).color(ERROR).small());
                }

                ui.add_space(8.0);
                let button = ui.add(
                    egui::Button::new(RichText::new("Sign in").color(TEXT_PRIMARY))
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(120.0, 0.0)),
                );

                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if button.clicked() || enter {
                    submitted = Some(state.login_input.clone());
                }
            });
    });

    submitted
}
