//! Drawing canvas view
//!
//! Turns pointer drags into segments and shows the current raster. What is
//! on screen is the raster itself, so the canvas always matches what would be
//! sent for recognition.

use egui::{Rect, Rounding, Sense, Stroke, TextureHandle, TextureOptions, Vec2};

use crate::drawing::raster::to_color_image;
use crate::ui::state::ScreenState;
use crate::ui::theme::ThemeColors;

/// Render the drawing canvas, uploading a new texture when the raster changes
pub fn render_canvas(ui: &mut egui::Ui, state: &mut ScreenState, texture: &mut Option<TextureHandle>) {
    let size = Vec2::new(ui.available_width(), state.canvas_height);
    let (rect, response) = ui.allocate_exact_size(size, Sense::drag());

    if response.dragged() {
        if let Some(pointer) = response.interact_pointer_pos() {
            let local = (pointer - rect.min).to_pos2();
            state.handle_drag(local, response.drag_delta());
        }
    }

    let width = rect.width().round().max(0.0) as u32;
    let height = rect.height().round().max(0.0) as u32;
    if state.refresh_raster(width, height) {
        if let Some(raster) = &state.raster {
            let image = to_color_image(raster);
            match texture {
                Some(handle) => handle.set(image, TextureOptions::LINEAR),
                None => {
                    *texture = Some(ui.ctx().load_texture("drawing", image, TextureOptions::LINEAR));
                }
            }
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, Rounding::same(4.0), ThemeColors::CANVAS);
    if let Some(handle) = texture.as_ref() {
        painter.image(
            handle.id(),
            rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }
    if state.strokes.is_empty() {
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "Draw a character",
            egui::FontId::proportional(16.0),
            ThemeColors::TEXT_MUTED,
        );
    }
    painter.rect_stroke(rect, Rounding::same(4.0), Stroke::new(1.0, ThemeColors::BORDER));
}
