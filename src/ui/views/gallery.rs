//! Gallery picker window

use egui::{Color32, RichText};

use crate::ui::state::ScreenState;
use crate::ui::theme::ThemeColors;

/// Render the picker window while it is open
pub fn render_gallery_window(ctx: &egui::Context, state: &mut ScreenState) {
    if !state.gallery.open {
        return;
    }

    let mut open = true;
    let mut choice: Option<usize> = None;

    egui::Window::new("Gallery")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_size([360.0, 420.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new(state.gallery.picker.directory().display().to_string())
                    .small()
                    .color(ThemeColors::TEXT_MUTED),
            );
            ui.separator();

            if let Some(ref error) = state.gallery.error {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").color(Color32::RED));
                    ui.label(RichText::new(error).color(ThemeColors::ACCENT_ERROR));
                });
                return;
            }

            let entries = state.gallery.picker.entries();
            if entries.is_empty() {
                ui.label(RichText::new("No images found").italics().color(ThemeColors::TEXT_MUTED));
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (idx, entry) in entries.iter().enumerate() {
                    if ui.selectable_label(false, &entry.name).clicked() {
                        choice = Some(idx);
                    }
                }
            });
        });

    if choice.is_some() || !open {
        state.close_gallery(choice);
    }
}
