//! Notification tray in the bottom-right corner.

use eframe::egui::{self, RichText, Rounding};

use crate::app::{PathTermApp, UiAction};
use crate::ui::colors;

/// Render pending notifications, newest at the bottom.
pub fn render(app: &mut PathTermApp, ctx: &egui::Context) {
    if app.notifications.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notification_tray"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -36.0))
        .show(ctx, |ui| {
            ui.set_max_width(380.0);
            for notification in &app.notifications {
                let bg = colors::card_bg(ui.visuals());
                egui::Frame::none()
                    .fill(bg)
                    .stroke(egui::Stroke::new(1.0, colors::severity(notification.severity)))
                    .rounding(Rounding::same(8.0))
                    .inner_margin(egui::Margin::same(10.0))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(notification.severity.to_string().to_uppercase())
                                    .size(10.0)
                                    .strong()
                                    .color(colors::severity(notification.severity)),
                            );
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("✕").clicked() {
                                        app.pending_actions.push(UiAction::Answer {
                                            id: notification.id,
                                            action: None,
                                        });
                                    }
                                },
                            );
                        });
                        ui.label(notification.message.as_str());

                        if !notification.actions.is_empty() {
                            ui.horizontal(|ui| {
                                for action in &notification.actions {
                                    if ui.button(action.as_str()).clicked() {
                                        app.pending_actions.push(UiAction::Answer {
                                            id: notification.id,
                                            action: Some(action.clone()),
                                        });
                                    }
                                }
                            });
                        }
                    });
                ui.add_space(6.0);
            }
        });
}
