//! Status bar at the bottom of the window.

use eframe::egui::{self, RichText};

use crate::app::PathTermApp;
use crate::ui::colors;

/// Shorten long paths from the left so the tail stays visible.
fn shorten(path: &str, max: usize) -> String {
    let count = path.chars().count();
    if count <= max {
        return path.to_string();
    }
    let tail: String = path.chars().skip(count - (max - 3)).collect();
    format!("...{}", tail)
}

/// Render the status bar.
pub fn render(app: &PathTermApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    ui.horizontal(|ui| {
        // Status message
        if let Some((msg, _)) = &app.status_message {
            ui.label(RichText::new(msg).size(11.0).color(muted));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(app.extension.platform().display_name())
                    .size(11.0)
                    .color(muted),
            );

            if let Some(active) = app.active_path() {
                ui.separator();
                ui.label(
                    RichText::new(format!("📄 {}", shorten(&active.to_string_lossy(), 50)))
                        .size(11.0)
                        .color(muted),
                );
            }

            if let Some(root) = app.explorer.root() {
                ui.separator();
                ui.label(
                    RichText::new(format!("📁 {}", shorten(&root.to_string_lossy(), 50)))
                        .size(11.0)
                        .color(muted),
                );
            }
        });
    });
}
