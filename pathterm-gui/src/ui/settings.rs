//! Settings side panel.

use eframe::egui::{self, RichText, Rounding, Vec2};

use pathterm_core::{Invocation, SettingKind};

use crate::app::{PathTermApp, UiAction};
use crate::ui::colors;

/// Render the settings panel from the last refreshed settings list.
pub fn render(app: &mut PathTermApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    ui.horizontal(|ui| {
        ui.heading("PathTerm Settings");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button("⟳")
                .on_hover_text("Refresh settings")
                .clicked()
            {
                app.pending_actions
                    .push(UiAction::Run(Invocation::RefreshSettingsView));
            }
        });
    });
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        for setting in &app.settings {
            match &setting.kind {
                SettingKind::Boolean { value } => {
                    let mut checked = *value;
                    if ui
                        .checkbox(&mut checked, setting.label.as_str())
                        .on_hover_text(setting.description)
                        .changed()
                    {
                        // The toggle flips the stored value; the next refresh
                        // brings the checkbox back in line with the store.
                        app.pending_actions.push(UiAction::Run(Invocation::ToggleFeature(
                            setting.key.to_string(),
                        )));
                    }
                }
                SettingKind::Enum { value, options } => {
                    let mut selected: Option<&str> = None;
                    ui.horizontal(|ui| {
                        ui.label(setting.label.as_str())
                            .on_hover_text(setting.description);
                        egui::ComboBox::from_id_salt(setting.key)
                            .selected_text(value.as_str())
                            .show_ui(ui, |ui| {
                                for option in options.iter() {
                                    if ui.selectable_label(value == option, *option).clicked() {
                                        selected = Some(*option);
                                    }
                                }
                            });
                    });
                    // Apply selection after ComboBox closes (avoids borrow conflict)
                    if let Some(option) = selected.filter(|option| option != value) {
                        app.pending_actions.push(UiAction::Select {
                            key: setting.key,
                            option: option.to_string(),
                        });
                    }
                }
            }
            ui.add_space(4.0);
        }

        ui.add_space(12.0);
        ui.label(RichText::new("Custom terminal command").strong());
        ui.label(
            RichText::new("Used when Linux Terminal is 'custom'. {path} is replaced by the folder.")
                .size(11.0)
                .color(muted)
                .italics(),
        );
        ui.add(
            egui::TextEdit::singleline(&mut app.custom_command)
                .hint_text("kitty --directory {path}")
                .desired_width(f32::INFINITY),
        );
        if ui
            .add_sized(
                Vec2::new(100.0, 28.0),
                egui::Button::new("Save").rounding(Rounding::same(8.0)),
            )
            .clicked()
        {
            app.pending_actions.push(UiAction::SaveCustomCommand);
        }

        ui.add_space(16.0);
        ui.label(
            RichText::new(format!(
                "v{} • {}",
                pathterm_core::VERSION,
                app.extension.platform().display_name()
            ))
            .size(11.0)
            .color(muted),
        );
    });
}
