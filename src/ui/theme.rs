//! Theme configuration for egui.
//!
//! Dark navy theme with one accent colour per convert target.

use egui::{Color32, Stroke, Visuals};

/// Apply the dark theme to egui context.
pub fn apply_dark_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    let bg_color = Color32::from_rgb(22, 33, 62); // #16213e
    let panel_color = Color32::from_rgb(26, 26, 46); // #1a1a2e
    let widget_color = Color32::from_rgb(15, 52, 96); // #0f3460
    let text_color = Color32::from_rgb(245, 246, 250); // #f5f6fa

    style.visuals = Visuals::dark();

    style.visuals.panel_fill = panel_color;
    style.visuals.window_fill = bg_color;
    style.visuals.extreme_bg_color = Color32::from_rgb(16, 16, 30);

    style.visuals.widgets.noninteractive.bg_fill = widget_color;
    style.visuals.widgets.inactive.bg_fill = widget_color;
    style.visuals.widgets.hovered.bg_fill = gbk_color();
    style.visuals.widgets.active.bg_fill = shift_jis_color();

    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, text_color);
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, text_color);
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    style.visuals.selection.bg_fill = accent_color().gamma_multiply(0.3);
    style.visuals.selection.stroke = Stroke::new(1.0, accent_color());

    style.visuals.window_rounding = 8.0.into();
    style.visuals.widgets.noninteractive.rounding = 4.0.into();
    style.visuals.widgets.inactive.rounding = 4.0.into();
    style.visuals.widgets.hovered.rounding = 4.0.into();
    style.visuals.widgets.active.rounding = 4.0.into();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = 12.0.into();
    style.spacing.button_padding = egui::vec2(14.0, 8.0);

    ctx.set_style(style);
}

/// Headings and highlights.
pub fn accent_color() -> Color32 {
    Color32::from_rgb(100, 181, 246)
}

/// "Convert to GBK" button.
pub fn gbk_color() -> Color32 {
    Color32::from_rgb(229, 80, 57) // #e55039
}

/// "Convert to Shift_JIS" button.
pub fn shift_jis_color() -> Color32 {
    Color32::from_rgb(72, 52, 212) // #4834d4
}

pub fn success_color() -> Color32 {
    Color32::from_rgb(39, 174, 96) // #27ae60
}

pub fn error_color() -> Color32 {
    Color32::from_rgb(231, 76, 60) // #e74c3c
}

pub fn warning_color() -> Color32 {
    Color32::from_rgb(255, 183, 77)
}

pub fn dim_text_color() -> Color32 {
    Color32::from_rgb(160, 166, 180)
}
