// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with mode selection, status and the "done" button.

use crate::config::LabelMode;
use crate::session::Session;

pub enum ToolbarAction {
    None,
    SetMode(LabelMode),
    Done,
}

/// Display the toolbar below the canvas.
pub fn show(ui: &mut egui::Ui, session: &Session) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");
        let mut mode = session.mode();
        egui::ComboBox::from_id_source("mode_selector")
            .selected_text(mode.name())
            .show_ui(ui, |ui| {
                for candidate in LabelMode::all() {
                    ui.selectable_value(&mut mode, *candidate, candidate.name());
                }
            });
        if mode != session.mode() {
            action = ToolbarAction::SetMode(mode);
        }

        ui.separator();
        ui.label(egui::RichText::new(session.status_text()).size(12.0));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let done = egui::Button::new("Done (Next Class/Image)");
            if ui.add_enabled(!session.is_complete(), done).clicked() {
                action = ToolbarAction::Done;
            }
        });
    });

    action
}
