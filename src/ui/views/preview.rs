//! Active image preview

use egui::{RichText, TextureHandle, Vec2};

use crate::source::ActiveImage;
use crate::ui::state::ScreenState;
use crate::ui::theme::ThemeColors;

/// Show whichever image would be sent for recognition
pub fn render_preview(ui: &mut egui::Ui, state: &ScreenState, drawing: Option<&TextureHandle>) {
    let size = Vec2::new(ui.available_width(), state.canvas_height);

    match state.image.current() {
        ActiveImage::Gallery(path) => {
            let uri = format!("file://{}", path.display());
            ui.add_sized(size, egui::Image::new(uri).fit_to_exact_size(size).maintain_aspect_ratio(true));
        }
        ActiveImage::Drawing(_) => match drawing {
            Some(handle) => {
                ui.add_sized(size, egui::Image::new(handle).fit_to_exact_size(size).bg_fill(ThemeColors::CANVAS));
            }
            None => placeholder(ui, size),
        },
        ActiveImage::Placeholder => placeholder(ui, size),
    }
}

fn placeholder(ui: &mut egui::Ui, size: Vec2) {
    egui::Frame::none()
        .fill(ThemeColors::BG_PANEL)
        .show(ui, |ui| {
            ui.set_min_size(size);
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No image").italics().color(ThemeColors::TEXT_MUTED));
            });
        });
}
