//! Editor area showing the active document.

use eframe::egui::{self, RichText, Rounding, Vec2};

use pathterm_core::{CommandId, Invocation};

use crate::app::{PathTermApp, UiAction};
use crate::ui::colors;

/// Render the editor area.
pub fn render(app: &mut PathTermApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    let Some(active) = app.active_path() else {
        ui.centered_and_justified(|ui| {
            ui.label(
                RichText::new("Select a file in the explorer to make it the active document")
                    .color(muted)
                    .italics(),
            );
        });
        return;
    };

    let name = active
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    ui.heading(format!("📄 {}", name));
    ui.label(RichText::new(active.display().to_string()).size(11.0).color(muted));
    ui.add_space(12.0);

    // Same commands as the menu, acting on the active document
    ui.horizontal(|ui| {
        for (id, invocation) in [
            (CommandId::GetCurrentPath, Invocation::GetCurrentPath(None)),
            (
                CommandId::OpenInExternalTerminal,
                Invocation::OpenInExternalTerminal(None),
            ),
        ] {
            if ui
                .add_sized(
                    Vec2::new(200.0, 30.0),
                    egui::Button::new(id.title()).rounding(Rounding::same(8.0)),
                )
                .clicked()
            {
                app.pending_actions.push(UiAction::Run(invocation));
            }
        }
    });
}
