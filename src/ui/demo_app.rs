//! Desktop window for raising and inspecting toasts.

use std::time::Duration;

use eframe::egui::{self, RichText};
use egui_phosphor::regular::{CHECK_CIRCLE, INFO, TRASH, WARNING, X_CIRCLE};

use crate::config::AppConfig;
use crate::notification::{Category, NotificationQueue};

use super::components::{self, colors, styled_button_with_icon};
use super::toast_overlay;

/// Main application state.
pub struct ToastDemoApp {
    /// Runtime the expiry timers run on.
    #[allow(dead_code)]
    rt: tokio::runtime::Runtime,
    queue: NotificationQueue,
    config: AppConfig,

    // Form
    message: String,
    lifetime_ms: u64,
}

impl ToastDemoApp {
    pub fn new(ctx: &egui::Context, rt: tokio::runtime::Runtime, config: AppConfig) -> Self {
        let queue = NotificationQueue::with_config(rt.handle().clone(), &config.notifications);
        toast_overlay::forward_repaints(rt.handle(), &queue, ctx.clone());

        let lifetime_ms = config.notifications.default_lifetime_ms;
        Self {
            rt,
            queue,
            config,
            message: "Declaration saved".to_string(),
            lifetime_ms,
        }
    }

    fn raise(&mut self, category: Category) {
        let lifetime = Some(Duration::from_millis(self.lifetime_ms));
        let id = self.queue.enqueue(self.message.clone(), Some(category), lifetime);
        tracing::info!(%id, "Toast raised from demo");
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("toast_form_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label("Message:");
                ui.text_edit_singleline(&mut self.message);
                ui.end_row();

                ui.label("Lifetime:");
                ui.add(egui::Slider::new(&mut self.lifetime_ms, 0..=20_000).suffix(" ms"));
                ui.end_row();
            });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            if styled_button_with_icon(ui, INFO, "Info").clicked() {
                self.raise(Category::Info);
            }
            if styled_button_with_icon(ui, CHECK_CIRCLE, "Success").clicked() {
                self.raise(Category::Success);
            }
            if styled_button_with_icon(ui, WARNING, "Warning").clicked() {
                self.raise(Category::Warning);
            }
            if styled_button_with_icon(ui, X_CIRCLE, "Error").clicked() {
                self.raise(Category::Error);
            }
        });
    }

    fn show_live_list(&mut self, ui: &mut egui::Ui) {
        let snapshot = self.queue.snapshot();

        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Live toasts: {}", snapshot.len())).strong());
            if !snapshot.is_empty() && styled_button_with_icon(ui, TRASH, "Dismiss all").clicked() {
                self.queue.clear();
            }
        });
        ui.add_space(6.0);

        if snapshot.is_empty() {
            ui.colored_label(colors::NEUTRAL, "Queue is empty");
            return;
        }

        egui::Grid::new("live_toasts_grid")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for notification in &snapshot {
                    let (accent, _) = components::category_style(&notification.category);
                    ui.label(notification.id.to_string());
                    ui.colored_label(accent, notification.category.as_str());
                    ui.label(&notification.message);
                    if ui.small_button("Dismiss").clicked() {
                        self.queue.dismiss(notification.id);
                    }
                    ui.end_row();
                }
            });
    }
}

impl eframe::App for ToastDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            components::panel_header(ui, "Notifications");
            self.show_controls(ui);
            ui.add_space(20.0);
            ui.separator();
            self.show_live_list(ui);
        });

        toast_overlay::show(ctx, &self.queue, self.config.ui.max_visible);
    }
}
