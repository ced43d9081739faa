//! Agent selection grid.

use egui::{self, RichText, Sense};
use chat_types::agent::AgentDescriptor;
use crate::theme::*;

/// Render one card per agent. Returns the id of the agent clicked.
pub fn agent_selection_panel(
    ui: &mut egui::Ui,
    agents: &[AgentDescriptor],
    selected: Option<&str>,
) -> Option<String> {
    let mut chosen = None;

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.heading(RichText::new("Choose an agent").color(TEXT_PRIMARY).strong());
            ui.label(
                RichText::new("Pick the specialist that fits your question")
                    .color(TEXT_SECONDARY),
            );
            ui.add_space(12.0);

            ui.horizontal_wrapped(|ui| {
                for agent in agents {
                    let is_selected = selected == Some(agent.id.as_str());
                    let card = egui::Frame::default()
                        .fill(if is_selected { BG_SURFACE } else { BG_SECONDARY })
                        .corner_radius(PANEL_ROUNDING)
                        .inner_margin(16.0)
                        .show(ui, |ui| {
                            ui.set_width(220.0);
                            ui.vertical_centered(|ui| {
                                ui.label(RichText::new(&agent.icon).size(36.0));
                                ui.label(RichText::new(&agent.name).color(TEXT_PRIMARY).strong());
                                if !agent.description.is_empty() {
                                    ui.label(
                                        RichText::new(&agent.description)
                                            .color(TEXT_SECONDARY)
                                            .small(),
                                    );
                                }
                            });
                        })
                        .response
                        .interact(Sense::click())
                        .on_hover_cursor(egui::CursorIcon::PointingHand);

                    if card.clicked() {
                        chosen = Some(agent.id.clone());
                    }
                }
            });
        });

    chosen
}
