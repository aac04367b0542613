//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};
use egui_phosphor::regular::{CHECK_CIRCLE, INFO, QUESTION, WARNING, X, X_CIRCLE};

use crate::notification::{Category, Notification};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const INFO: Color32 = Color32::from_rgb(110, 170, 255);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Accent color and icon for a category. Unknown names render neutral.
pub fn category_style(category: &Category) -> (Color32, &'static str) {
    match category {
        Category::Info => (colors::INFO, INFO),
        Category::Success => (colors::SUCCESS, CHECK_CIRCLE),
        Category::Warning => (colors::WARNING, WARNING),
        Category::Error => (colors::ERROR, X_CIRCLE),
        Category::Other(_) => (colors::NEUTRAL, QUESTION),
    }
}

/// Render one toast card. Returns true when its close button was clicked.
pub fn toast_card(ui: &mut Ui, notification: &Notification) -> bool {
    let (accent, icon) = category_style(&notification.category);
    let mut close = false;

    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .stroke(egui::Stroke::new(1.0, accent))
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_width(280.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon).size(18.0).color(accent));
                ui.vertical(|ui| {
                    ui.label(RichText::new(&notification.message).size(14.0));
                    ui.label(
                        RichText::new(notification.created_at.format("%H:%M:%S").to_string())
                            .size(11.0)
                            .weak(),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    close = ui.small_button(X).on_hover_text("Dismiss").clicked();
                });
            });
        });

    close
}

/// Render a button with a leading phosphor icon.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.button(RichText::new(format!("{icon}  {label}")).size(14.0))
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}
