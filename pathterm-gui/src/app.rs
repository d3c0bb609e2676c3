//! Main application state and update loop.

use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use tokio::runtime::Runtime;
use tokio::sync::{broadcast, oneshot};
use tracing::{debug, error, info, warn};

use pathterm_core::{
    Database, Execution, Extension, HostServices, Invocation, Setting, SettingsEvent, Severity,
};

use crate::host::{ActiveDocument, GuiHost, UiRequest, UiRequestReceiver};
use crate::ui;
use crate::ui::explorer::Explorer;

/// Seconds an action-less notification stays on screen.
const NOTIFICATION_TTL_SECS: i64 = 8;

// =============================================================================
// Notifications
// =============================================================================

/// A message in the notification tray.
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub actions: Vec<String>,
    /// Present while a dispatch task waits for the user's choice.
    pub reply: Option<oneshot::Sender<Option<String>>>,
    pub created: chrono::DateTime<chrono::Utc>,
}

impl Notification {
    fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.reply.is_none()
            && self.severity == Severity::Info
            && now - self.created > chrono::Duration::seconds(NOTIFICATION_TTL_SECS)
    }
}

/// User input collected while rendering, applied after the frame's UI pass.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Run(Invocation),
    Select { key: &'static str, option: String },
    SaveCustomCommand,
    Activate(PathBuf),
    Answer { id: u64, action: Option<String> },
}

// =============================================================================
// Application State
// =============================================================================

/// Main application state.
pub struct PathTermApp {
    /// Tokio runtime for dispatch tasks.
    pub runtime: Runtime,

    /// The add-on, bound to the settings database.
    pub extension: Extension<Database>,

    /// Settings as of the last refresh event.
    pub settings: Vec<Setting>,

    /// Draft of `terminal.customCommand` in the settings panel.
    pub custom_command: String,

    settings_rx: broadcast::Receiver<SettingsEvent>,

    // -------------------------------------------------------------------------
    // Workbench
    // -------------------------------------------------------------------------
    /// File explorer rooted at the opened folder.
    pub explorer: Explorer,

    /// Document shown as active in the editor area.
    pub active_document: ActiveDocument,

    /// Notification tray, oldest first.
    pub notifications: Vec<Notification>,

    next_notification_id: u64,

    ui_rx: UiRequestReceiver,

    // -------------------------------------------------------------------------
    // UI State
    // -------------------------------------------------------------------------
    /// Show the settings side panel.
    pub show_settings: bool,

    pub dark_mode: bool,

    /// Status message.
    pub status_message: Option<(String, chrono::DateTime<chrono::Utc>)>,

    /// Pending folder selection result receiver.
    folder_result_rx: Option<oneshot::Receiver<Option<PathBuf>>>,

    /// Actions queued during rendering.
    pub pending_actions: Vec<UiAction>,
}

impl PathTermApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>, runtime: Runtime, db: Database) -> Self {
        info!("Initializing PathTermApp");

        let active_document = ActiveDocument::default();
        let (host, ui_rx) = GuiHost::new(cc.egui_ctx.clone(), active_document.clone());
        let host = Arc::new(host);
        let services = HostServices::with_system(host.clone(), host.clone(), host);

        let extension = Extension::new(db, services);
        let settings_rx = extension.settings().subscribe();
        let settings = extension.list_settings();
        let custom_command = extension.config().terminal.custom_command;
        debug!(count = settings.len(), "Loaded settings");

        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        cc.egui_ctx.set_style(style);

        Self {
            runtime,
            extension,
            settings,
            custom_command,
            settings_rx,
            explorer: Explorer::default(),
            active_document,
            notifications: Vec::new(),
            next_notification_id: 0,
            ui_rx,
            show_settings: true,
            dark_mode: true,
            status_message: None,
            folder_result_rx: None,
            pending_actions: Vec::new(),
        }
    }

    /// Path of the active document, if any.
    pub fn active_path(&self) -> Option<PathBuf> {
        match self.active_document.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_active(&mut self, path: PathBuf) {
        debug!(path = %path.display(), "Active document changed");
        match self.active_document.write() {
            Ok(mut guard) => *guard = Some(path),
            Err(poisoned) => *poisoned.into_inner() = Some(path),
        }
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Execute a command; asynchronous parts run on the runtime.
    pub fn run_command(&mut self, invocation: Invocation) {
        let id = invocation.id();
        match self.extension.execute(invocation) {
            Execution::Done => {}
            Execution::Pending(task) => {
                self.runtime.spawn(task);
                self.set_status(&format!("{}...", id.title()));
            }
        }
    }

    fn select(&mut self, key: &str, option: &str) {
        if let Err(e) = self.extension.select(key, option) {
            error!(key, option, error = %e, "Failed to update setting");
            self.set_status(&format!("Failed to update setting: {}", e));
        }
    }

    fn save_custom_command(&mut self) {
        match self.extension.set_custom_command(&self.custom_command) {
            Ok(()) => self.set_status("Custom command saved"),
            Err(e) => {
                error!(error = %e, "Failed to save custom command");
                self.set_status(&format!("Failed to save custom command: {}", e));
            }
        }
    }

    fn apply_actions(&mut self) {
        for action in std::mem::take(&mut self.pending_actions) {
            match action {
                UiAction::Run(invocation) => self.run_command(invocation),
                UiAction::Select { key, option } => self.select(key, &option),
                UiAction::SaveCustomCommand => self.save_custom_command(),
                UiAction::Activate(path) => self.set_active(path),
                UiAction::Answer { id, action } => self.answer(id, action),
            }
        }
    }

    // -------------------------------------------------------------------------
    // Channels
    // -------------------------------------------------------------------------

    /// Re-query the settings list after a refresh event.
    fn check_settings_events(&mut self) {
        let mut refresh = false;
        loop {
            match self.settings_rx.try_recv() {
                Ok(SettingsEvent::Refreshed) => refresh = true,
                Ok(SettingsEvent::Changed { key }) => debug!(key = %key, "Setting changed"),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Settings events lagged");
                    refresh = true;
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }
        if refresh {
            self.settings = self.extension.list_settings();
        }
    }

    /// Serve notification, prompt and clipboard requests from dispatch tasks.
    fn process_ui_requests(&mut self, ctx: &egui::Context) {
        while let Ok(request) = self.ui_rx.try_recv() {
            match request {
                UiRequest::Notify { severity, message } => {
                    self.push_notification(severity, message, Vec::new(), None);
                }
                UiRequest::Prompt {
                    message,
                    actions,
                    reply,
                } => {
                    self.push_notification(Severity::Info, message, actions, Some(reply));
                }
                UiRequest::CopyText(text) => {
                    ctx.copy_text(text);
                }
            }
        }
    }

    fn push_notification(
        &mut self,
        severity: Severity,
        message: String,
        actions: Vec<String>,
        reply: Option<oneshot::Sender<Option<String>>>,
    ) {
        self.next_notification_id += 1;
        self.notifications.push(Notification {
            id: self.next_notification_id,
            severity,
            message,
            actions,
            reply,
            created: chrono::Utc::now(),
        });
    }

    /// Close a notification, answering its prompt if it has one.
    fn answer(&mut self, id: u64, action: Option<String>) {
        let Some(index) = self.notifications.iter().position(|n| n.id == id) else {
            return;
        };
        let notification = self.notifications.remove(index);
        if let Some(reply) = notification.reply {
            // The task may have gone away; nothing to do then.
            let _ = reply.send(action);
        }
    }

    fn expire_notifications(&mut self) {
        let now = chrono::Utc::now();
        self.notifications.retain(|n| !n.is_expired(now));
    }

    // -------------------------------------------------------------------------
    // Status & Folder
    // -------------------------------------------------------------------------

    /// Set a status message.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), chrono::Utc::now()));
    }

    /// Clear old status messages.
    pub fn clear_old_status(&mut self) {
        if let Some((_, time)) = &self.status_message {
            if chrono::Utc::now() - *time > chrono::Duration::seconds(5) {
                self.status_message = None;
            }
        }
    }

    /// Open a folder selection dialog asynchronously.
    pub fn open_folder_dialog(&mut self) {
        // Don't open another dialog if one is pending
        if self.folder_result_rx.is_some() {
            return;
        }

        let (tx, rx) = oneshot::channel();
        self.folder_result_rx = Some(rx);

        self.runtime.spawn(async move {
            let folder = rfd::AsyncFileDialog::new()
                .pick_folder()
                .await
                .map(|f| f.path().to_path_buf());
            let _ = tx.send(folder);
        });
    }

    /// Check for folder selection completion.
    fn check_folder_selection(&mut self) {
        if let Some(mut rx) = self.folder_result_rx.take() {
            match rx.try_recv() {
                Ok(Some(folder)) => {
                    info!("Opened folder: {}", folder.display());
                    self.explorer.open(folder.clone());
                    self.set_status(&format!("Opened: {}", folder.display()));
                }
                Ok(None) => {
                    debug!("Folder selection cancelled");
                }
                Err(oneshot::error::TryRecvError::Empty) => {
                    self.folder_result_rx = Some(rx);
                }
                Err(oneshot::error::TryRecvError::Closed) => {
                    warn!("Folder selection channel closed unexpectedly");
                }
            }
        }
    }
}

impl eframe::App for PathTermApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for async completions
        self.check_folder_selection();
        self.check_settings_events();
        self.process_ui_requests(ctx);
        self.expire_notifications();
        self.clear_old_status();

        // Top panel with menu
        egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
            ui::menu::render(self, ui, ctx);
        });

        // Status bar at bottom
        egui::TopBottomPanel::bottom("status_panel")
            .max_height(24.0)
            .show(ctx, |ui| {
                ui::status::render(self, ui);
            });

        if self.show_settings {
            egui::SidePanel::right("settings_panel")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| {
                    ui::settings::render(self, ui);
                });
        }

        egui::SidePanel::left("explorer_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                ui::explorer::render(self, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::editor::render(self, ui);
        });

        ui::notifications::render(self, ctx);

        self.apply_actions();

        // Keep polling while anything can arrive from the runtime
        if self.folder_result_rx.is_some() || !self.notifications.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(severity: Severity, reply: Option<oneshot::Sender<Option<String>>>) -> Notification {
        Notification {
            id: 1,
            severity,
            message: "m".to_string(),
            actions: Vec::new(),
            reply,
            created: chrono::Utc::now() - chrono::Duration::seconds(NOTIFICATION_TTL_SECS + 1),
        }
    }

    #[test]
    fn old_info_notifications_expire() {
        let now = chrono::Utc::now();
        assert!(notification(Severity::Info, None).is_expired(now));
    }

    #[test]
    fn errors_and_prompts_stay_until_dismissed() {
        let now = chrono::Utc::now();
        assert!(!notification(Severity::Error, None).is_expired(now));

        let (tx, _rx) = oneshot::channel();
        assert!(!notification(Severity::Info, Some(tx)).is_expired(now));
    }
}
