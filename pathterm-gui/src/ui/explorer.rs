//! File explorer panel.
//!
//! Entries carry a context menu with the PathTerm commands; clicking a file
//! makes it the active document.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use eframe::egui::{self, RichText};
use tracing::warn;

use pathterm_core::{Invocation, PathRef};

use crate::app::{PathTermApp, UiAction};
use crate::ui::colors;

/// One directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
}

/// Opened folder with lazily listed, cached directories.
#[derive(Debug, Default)]
pub struct Explorer {
    root: Option<PathBuf>,
    children: HashMap<PathBuf, Vec<Entry>>,
}

impl Explorer {
    pub fn open(&mut self, root: PathBuf) {
        self.root = Some(root);
        self.children.clear();
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Drop cached listings so they are read again.
    pub fn reload(&mut self) {
        self.children.clear();
    }

    /// Entries of `dir`, listed on first use.
    pub fn children(&mut self, dir: &Path) -> &[Entry] {
        self.children.entry(dir.to_path_buf()).or_insert_with(|| {
            list_dir(dir).unwrap_or_else(|e| {
                warn!(dir = %dir.display(), error = %e, "Failed to list directory");
                Vec::new()
            })
        })
    }
}

/// List `dir`, folders first, then by case-insensitive name.
pub fn list_dir(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(Entry {
            path: entry.path(),
            name: entry.file_name().to_string_lossy().to_string(),
            is_dir,
        });
    }
    entries.sort_by(|a, b| {
        b.is_dir
            .cmp(&a.is_dir)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    Ok(entries)
}

/// Render the explorer panel.
pub fn render(app: &mut PathTermApp, ui: &mut egui::Ui) {
    let muted = colors::muted(ui.visuals());

    ui.horizontal(|ui| {
        ui.heading("Explorer");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⟳").on_hover_text("Reload").clicked() {
                app.explorer.reload();
            }
        });
    });
    ui.separator();

    let Some(root) = app.explorer.root().map(Path::to_path_buf) else {
        ui.label(RichText::new("No folder opened").color(muted).italics());
        if ui.button("Open Folder...").clicked() {
            app.open_folder_dialog();
        }
        return;
    };

    let active = app.active_path();
    egui::ScrollArea::vertical().show(ui, |ui| {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.display().to_string());
        let response = ui.label(RichText::new(format!("📁 {}", name)).strong());
        entry_menu(&mut app.pending_actions, &response, &root);

        render_dir(app, ui, &root, active.as_deref());
    });
}

fn render_dir(app: &mut PathTermApp, ui: &mut egui::Ui, dir: &Path, active: Option<&Path>) {
    let entries = app.explorer.children(dir).to_vec();
    for entry in entries {
        if entry.is_dir {
            let collapsing = egui::CollapsingHeader::new(format!("📁 {}", entry.name))
                .id_salt(&entry.path)
                .show(ui, |ui| render_dir(app, ui, &entry.path, active));
            entry_menu(&mut app.pending_actions, &collapsing.header_response, &entry.path);
        } else {
            let is_active = active == Some(entry.path.as_path());
            let mut text = RichText::new(format!("📄 {}", entry.name));
            if is_active {
                text = text.background_color(colors::active_bg(ui.visuals()));
            }
            let response = ui.selectable_label(is_active, text);
            if response.clicked() {
                app.pending_actions.push(UiAction::Activate(entry.path.clone()));
            }
            entry_menu(&mut app.pending_actions, &response, &entry.path);
        }
    }
}

/// Attach the PathTerm context menu to an entry.
fn entry_menu(actions: &mut Vec<UiAction>, response: &egui::Response, path: &Path) {
    response.context_menu(|ui| {
        if ui.button("📋 Get Path").clicked() {
            actions.push(UiAction::Run(Invocation::GetCurrentPath(Some(PathRef::new(path)))));
            ui.close_menu();
        }
        if ui.button("💻 Open in External Terminal").clicked() {
            actions.push(UiAction::Run(Invocation::OpenInExternalTerminal(Some(
                PathRef::new(path),
            ))));
            ui.close_menu();
        }
    });
}
