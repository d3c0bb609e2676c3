//! Top menu bar.

use eframe::egui::{self, RichText};

use pathterm_core::{CommandId, Invocation};

use crate::app::{PathTermApp, UiAction};
use crate::ui::colors;

/// Render the top menu bar.
pub fn render(app: &mut PathTermApp, ui: &mut egui::Ui, ctx: &egui::Context) {
    egui::menu::bar(ui, |ui| {
        ui.label(RichText::new("PathTerm").strong().size(15.0));
        ui.separator();

        // File menu
        ui.menu_button("File", |ui| {
            if ui.button("Open Folder...").clicked() {
                app.open_folder_dialog();
                ui.close_menu();
            }

            ui.separator();

            if ui.button("Quit").clicked() {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        // Commands act on the active document
        ui.menu_button("Commands", |ui| {
            for (id, invocation) in [
                (CommandId::GetCurrentPath, Invocation::GetCurrentPath(None)),
                (
                    CommandId::OpenInExternalTerminal,
                    Invocation::OpenInExternalTerminal(None),
                ),
                (CommandId::RefreshSettingsView, Invocation::RefreshSettingsView),
            ] {
                if ui.button(id.title()).on_hover_text(id.as_str()).clicked() {
                    app.pending_actions.push(UiAction::Run(invocation));
                    ui.close_menu();
                }
            }
        });

        // View menu
        ui.menu_button("View", |ui| {
            ui.checkbox(&mut app.show_settings, "Settings Panel");

            if ui.checkbox(&mut app.dark_mode, "Dark Mode").changed() {
                let visuals = if app.dark_mode {
                    egui::Visuals::dark()
                } else {
                    egui::Visuals::light()
                };
                ctx.set_visuals(visuals);
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let pending = app.notifications.iter().filter(|n| n.reply.is_some()).count();
            if pending > 0 {
                ui.label(
                    RichText::new(format!("{} waiting", pending))
                        .color(colors::ACCENT)
                        .size(12.0),
                );
            }
        });
    });
}
