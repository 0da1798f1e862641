// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! The app is a thin shell around [`Session`]: it turns menu, toolbar and
//! canvas actions into session calls and keeps the image texture in sync
//! with the session's current image.

use crate::config::LabelerConfig;
use crate::io::{discovery, media};
use crate::session::{Advance, Session};
use crate::ui::{canvas, edit_dialog, toolbar};
use std::path::PathBuf;

/// Main application state.
pub struct BoxmarkApp {
    /// Labeling session; taken out when the window closes
    session: Option<Session>,

    config: LabelerConfig,

    /// Texture of the current image, resized to the canvas
    image_texture: Option<egui::TextureHandle>,

    /// Image the texture was built from
    texture_source: Option<PathBuf>,

    /// Window title last sent to the viewport
    title: String,

    /// Box being dragged on the canvas
    drag: canvas::DragState,

    /// Open annotation editor
    editor: Option<edit_dialog::EditDialog>,

    /// Last error shown in the status bar
    error_message: Option<String>,
}

impl BoxmarkApp {
    /// Create the application around an opened session.
    pub fn new(session: Session, config: LabelerConfig) -> Self {
        Self {
            session: Some(session),
            config,
            image_texture: None,
            texture_source: None,
            title: String::new(),
            drag: canvas::DragState::default(),
            editor: None,
            error_message: None,
        }
    }

    fn report_error(&mut self, context: &str, error: impl std::fmt::Display) {
        log::error!("{}: {}", context, error);
        self.error_message = Some(format!("{}: {}", context, error));
    }

    /// Rebuild the texture when the session moved to another image.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let current = session.current_image().map(PathBuf::from);
        if current == self.texture_source {
            return;
        }

        self.image_texture = None;
        self.texture_source = current.clone();
        self.drag = canvas::DragState::default();
        self.editor = None;

        if let Some(path) = current {
            match media::load_image(&path, self.config.canvas_size) {
                Ok(loaded) => {
                    let size = [loaded.width as usize, loaded.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                    self.image_texture =
                        Some(ctx.load_texture("current_image", color_image, egui::TextureOptions::LINEAR));
                    log::info!("Loaded image: {}", path.display());
                }
                Err(e) => self.report_error("Failed to load image", e),
            }
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let title = session.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    /// Pick a new image folder and switch the session to it.
    fn open_folder(&mut self) {
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };
        let images = discovery::discover_images(&dir);
        if let Some(session) = self.session.as_mut() {
            if let Err(e) = session.load_image_set(images) {
                self.report_error("Failed to save before switching folders", e);
                return;
            }
        }
        self.config.image_dir = dir;
        self.error_message = None;
    }

    fn save(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match session.save() {
            Ok(Some(path)) => log::info!("Saved {}", path.display()),
            Ok(None) => log::info!("Nothing to save"),
            Err(e) => self.report_error("Failed to save annotations", e),
        }
    }

    fn done(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.advance_class() {
            Ok(Advance::NextClass) => {}
            Ok(Advance::NextImage) | Ok(Advance::AllLabeled) => self.error_message = None,
            Err(e) => self.report_error("Failed to advance", e),
        }
    }

    fn zoom(&mut self, zoom_in: bool) {
        if let Some(session) = self.session.as_mut() {
            let changed = if zoom_in {
                session.zoom_in()
            } else {
                session.zoom_out()
            };
            if changed {
                // Pixel rectangles are derived from normalized boxes on every frame
                self.drag = canvas::DragState::default();
            }
        }
    }

    /// Save on window close.
    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            match session.close() {
                Ok(Some(path)) => log::info!("Saved {} on exit", path.display()),
                Ok(None) => {}
                Err(e) => log::error!("Failed to save annotations on exit: {}", e),
            }
        }
    }
}

impl eframe::App for BoxmarkApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) {
            self.close_session();
            return;
        }

        self.sync_texture(ctx);
        self.sync_title(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image Folder...").clicked() {
                        self.open_folder();
                        ui.close_menu();
                    }
                    if ui.button("Save Annotations").clicked() {
                        self.save();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Zoom In").clicked() {
                        self.zoom(true);
                        ui.close_menu();
                    }
                    if ui.button("Zoom Out").clicked() {
                        self.zoom(false);
                        ui.close_menu();
                    }
                    if ui.button("Reset Zoom").clicked() {
                        if let Some(session) = self.session.as_mut() {
                            session.reset_zoom();
                        }
                        ui.close_menu();
                    }
                });
            });
        });

        let Some(session) = self.session.as_ref() else {
            return;
        };

        // Toolbar and status below the canvas
        let toolbar_action = egui::TopBottomPanel::bottom("toolbar")
            .show(ctx, |ui| {
                let action = toolbar::show(ui, session);
                if let Some(ref message) = self.error_message {
                    ui.label(egui::RichText::new(message).color(egui::Color32::LIGHT_RED));
                }
                action
            })
            .inner;

        // Main canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| canvas::show(ui, session, &self.image_texture, &mut self.drag))
            .inner;

        let edit_action = match self.editor.as_mut() {
            Some(editor) => editor.show(ctx, session),
            None => edit_dialog::EditAction::None,
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.editor = None;
            self.drag = canvas::DragState::default();
        }

        // Handle toolbar actions
        match toolbar_action {
            toolbar::ToolbarAction::SetMode(mode) => {
                if let Some(session) = self.session.as_mut() {
                    session.set_mode(mode);
                    log::info!("Mode set to {}", mode.name());
                }
            }
            toolbar::ToolbarAction::Done => self.done(),
            toolbar::ToolbarAction::None => {}
        }

        // Handle canvas actions
        match canvas_action {
            canvas::CanvasAction::EditAnnotation(id) => {
                if let Some(session) = self.session.as_ref() {
                    self.editor = edit_dialog::EditDialog::open(session, id);
                }
            }
            canvas::CanvasAction::DrawBox(rect) => {
                if let Some(session) = self.session.as_mut() {
                    if let Err(e) = session.draw_box(rect) {
                        self.report_error("Failed to add box", e);
                    }
                }
            }
            canvas::CanvasAction::ZoomIn => self.zoom(true),
            canvas::CanvasAction::ZoomOut => self.zoom(false),
            canvas::CanvasAction::None => {}
        }

        // Handle editor actions
        match edit_action {
            edit_dialog::EditAction::Apply(id, class_id) => {
                self.editor = None;
                if let Some(session) = self.session.as_mut() {
                    if let Err(e) = session.relabel(id, class_id) {
                        self.report_error("Failed to relabel", e);
                    }
                }
            }
            edit_dialog::EditAction::Delete(id) => {
                self.editor = None;
                if let Some(session) = self.session.as_mut() {
                    if let Err(e) = session.delete(id) {
                        self.report_error("Failed to delete", e);
                    }
                }
            }
            edit_dialog::EditAction::Close => self.editor = None,
            edit_dialog::EditAction::None => {}
        }
    }
}
