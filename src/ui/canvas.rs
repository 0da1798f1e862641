// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for image display and box annotation.
//!
//! This module paints the zoomed image inside a scroll area, draws the
//! session's boxes on top, and turns pointer input into canvas actions.

use crate::models::annotation::{AnnotationId, PixelPoint, PixelRect};
use crate::session::Session;

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    /// Clicked or pressed inside an existing box
    EditAnnotation(AnnotationId),
    /// Finished dragging a new box
    DrawBox(PixelRect),
    ZoomIn,
    ZoomOut,
}

/// Drag in progress, in canvas pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    start: Option<PixelPoint>,
    current: Option<PixelPoint>,
}

const BOX_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);

/// Display the canvas and handle mouse interactions.
pub fn show(
    ui: &mut egui::Ui,
    session: &Session,
    image_texture: &Option<egui::TextureHandle>,
    drag: &mut DragState,
) -> CanvasAction {
    let mut action = CanvasAction::None;
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::BLACK;

    if session.is_complete() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("All images labeled.")
                    .size(18.0)
                    .color(egui::Color32::from_gray(200)),
            );
        });
        return action;
    }

    let zoomed_size = session.view().zoomed_size() as f32;

    egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
        let (image_rect, response) = ui.allocate_exact_size(
            egui::vec2(zoomed_size, zoomed_size),
            egui::Sense::click_and_drag(),
        );
        let to_canvas = |pos: egui::Pos2| {
            PixelPoint::new((pos.x - image_rect.min.x) as f64, (pos.y - image_rect.min.y) as f64)
        };

        let painter = ui.painter_at(image_rect);
        match image_texture {
            Some(texture) => painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            ),
            None => painter.rect_filled(image_rect, 0.0, egui::Color32::BLACK),
        };

        // Press inside a box edits it; anywhere else starts a new box
        if response.drag_started() {
            let origin = ui.input(|i| i.pointer.press_origin());
            if let Some(pos) = origin.or(response.interact_pointer_pos()) {
                let point = to_canvas(pos);
                match session.hit_test(point) {
                    Some(id) => action = CanvasAction::EditAnnotation(id),
                    None => {
                        drag.start = Some(point);
                        drag.current = Some(point);
                    }
                }
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some(id) = session.hit_test(to_canvas(pos)) {
                    action = CanvasAction::EditAnnotation(id);
                }
            }
        }

        if drag.start.is_some() && response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                drag.current = Some(to_canvas(pos));
            }
        }

        if response.drag_stopped() {
            if let (Some(start), Some(end)) = (drag.start.take(), drag.current.take()) {
                action = CanvasAction::DrawBox(PixelRect::from_corners(start, end));
            }
        }

        if response.hovered() {
            let zoom_delta = ui.input(|i| i.zoom_delta());
            if zoom_delta > 1.0 {
                action = CanvasAction::ZoomIn;
            } else if zoom_delta < 1.0 {
                action = CanvasAction::ZoomOut;
            }
        }

        let to_screen = |rect: &PixelRect| {
            egui::Rect::from_min_max(
                image_rect.min + egui::vec2(rect.x0 as f32, rect.y0 as f32),
                image_rect.min + egui::vec2(rect.x1 as f32, rect.y1 as f32),
            )
        };

        for (_, rect, annotation) in session.boxes() {
            let screen = to_screen(&rect);
            painter.rect_stroke(screen, 0.0, egui::Stroke::new(2.0, BOX_COLOR));
            painter.text(
                screen.min + egui::vec2(4.0, 4.0),
                egui::Align2::LEFT_TOP,
                session.catalog().name_of(annotation.class_id),
                egui::FontId::proportional(10.0),
                egui::Color32::WHITE,
            );
        }

        if let (Some(start), Some(current)) = (drag.start, drag.current) {
            let rect = PixelRect::from_corners(start, current);
            painter.rect_stroke(to_screen(&rect), 0.0, egui::Stroke::new(2.0, BOX_COLOR));
        }
    });

    action
}
