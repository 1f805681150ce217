//! UI theme and styling
//!
//! Light theme so the drawing reads like ink on paper.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Color palette
pub struct ThemeColors;

impl ThemeColors {
    // Background colors
    pub const BG_PAGE: Color32 = Color32::from_rgb(246, 246, 248);
    pub const BG_PANEL: Color32 = Color32::from_rgb(236, 236, 240);
    pub const BG_HOVER: Color32 = Color32::from_rgb(222, 222, 230);
    pub const CANVAS: Color32 = Color32::WHITE;

    // Accent colors
    pub const ACCENT_PRIMARY: Color32 = Color32::from_rgb(40, 110, 220);
    pub const ACCENT_SUCCESS: Color32 = Color32::from_rgb(30, 150, 80);
    pub const ACCENT_WARNING: Color32 = Color32::from_rgb(200, 140, 0);
    pub const ACCENT_ERROR: Color32 = Color32::from_rgb(200, 50, 40);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(25, 25, 30);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 130);

    // Border colors
    pub const BORDER: Color32 = Color32::from_rgb(200, 200, 210);
}

/// Apply the theme to egui
pub fn apply_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let mut visuals = Visuals::light();

    visuals.window_fill = ThemeColors::BG_PANEL;
    visuals.panel_fill = ThemeColors::BG_PAGE;
    visuals.faint_bg_color = ThemeColors::BG_PANEL;
    visuals.extreme_bg_color = ThemeColors::CANVAS;

    visuals.widgets.inactive.bg_fill = ThemeColors::BG_PANEL;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);

    visuals.widgets.hovered.bg_fill = ThemeColors::BG_HOVER;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, ThemeColors::TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);

    visuals.widgets.active.bg_fill = ThemeColors::ACCENT_PRIMARY;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(6.0);

    visuals.selection.bg_fill = color_with_alpha(ThemeColors::ACCENT_PRIMARY, 77);
    visuals.selection.stroke = Stroke::new(1.0, ThemeColors::ACCENT_PRIMARY);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, ThemeColors::BORDER);

    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);

    style.text_styles = [
        (TextStyle::Small, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(15.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(17.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional)),
    ]
    .into();

    ctx.set_style(style);
}

/// Helper to create a color with modified alpha
pub fn color_with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
