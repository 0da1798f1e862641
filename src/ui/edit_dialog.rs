// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Popup for changing the class of a box or deleting it.

use crate::models::annotation::AnnotationId;
use crate::session::Session;

/// An open editor for one annotation.
pub struct EditDialog {
    pub id: AnnotationId,
    /// Class id picked in the dropdown
    pub class_id: u32,
}

pub enum EditAction {
    None,
    Apply(AnnotationId, u32),
    Delete(AnnotationId),
    Close,
}

impl EditDialog {
    /// Start editing, or `None` if the box is gone.
    pub fn open(session: &Session, id: AnnotationId) -> Option<Self> {
        let annotation = session.store().get(id)?;
        Some(Self {
            id,
            class_id: annotation.class_id,
        })
    }

    pub fn show(&mut self, ctx: &egui::Context, session: &Session) -> EditAction {
        let mut action = EditAction::None;
        let mut open = true;

        egui::Window::new("Edit Annotation")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label("Label:");
                egui::ComboBox::from_id_source("edit_class")
                    .selected_text(session.catalog().name_of(self.class_id))
                    .show_ui(ui, |ui| {
                        for entry in session.catalog().entries() {
                            ui.selectable_value(&mut self.class_id, entry.id, entry.name.as_str());
                        }
                    });

                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        action = EditAction::Apply(self.id, self.class_id);
                    }
                    if ui.button("Delete").clicked() {
                        action = EditAction::Delete(self.id);
                    }
                });
            });

        if !open {
            action = EditAction::Close;
        }
        action
    }
}
