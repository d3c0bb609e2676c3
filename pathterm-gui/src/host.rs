//! Host services backed by the egui window.
//!
//! Dispatch tasks run on the tokio runtime; anything that touches the window
//! is sent to the UI thread as a [`UiRequest`] and drained every frame.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use eframe::egui;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use pathterm_core::{Clipboard, ClipboardError, EditorContext, Notifier, Severity};

/// Work the UI thread performs on behalf of a dispatch task.
#[derive(Debug)]
pub enum UiRequest {
    Notify {
        severity: Severity,
        message: String,
    },
    Prompt {
        message: String,
        actions: Vec<String>,
        reply: oneshot::Sender<Option<String>>,
    },
    CopyText(String),
}

pub type UiRequestReceiver = mpsc::UnboundedReceiver<UiRequest>;

/// Path of the document currently shown as active.
pub type ActiveDocument = Arc<RwLock<Option<PathBuf>>>;

/// Notifier, clipboard and editor context for the workbench window.
pub struct GuiHost {
    requests: mpsc::UnboundedSender<UiRequest>,
    ctx: egui::Context,
    active: ActiveDocument,
}

impl GuiHost {
    pub fn new(ctx: egui::Context, active: ActiveDocument) -> (Self, UiRequestReceiver) {
        let (requests, rx) = mpsc::unbounded_channel();
        (
            Self {
                requests,
                ctx,
                active,
            },
            rx,
        )
    }

    fn send(&self, request: UiRequest) -> bool {
        let sent = self.requests.send(request).is_ok();
        if sent {
            self.ctx.request_repaint();
        } else {
            warn!("UI request dropped, window is gone");
        }
        sent
    }
}

#[async_trait]
impl Notifier for GuiHost {
    fn notify(&self, severity: Severity, message: &str) {
        self.send(UiRequest::Notify {
            severity,
            message: message.to_string(),
        });
    }

    async fn prompt(&self, message: &str, actions: &[&str]) -> Option<String> {
        let (reply, rx) = oneshot::channel();
        let request = UiRequest::Prompt {
            message: message.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            reply,
        };
        if !self.send(request) {
            return None;
        }
        // A dismissed notification drops the sender.
        rx.await.ok().flatten()
    }
}

impl Clipboard for GuiHost {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.send(UiRequest::CopyText(text.to_string())) {
            Ok(())
        } else {
            Err(ClipboardError("window closed".to_string()))
        }
    }
}

impl EditorContext for GuiHost {
    fn active_document(&self) -> Option<PathBuf> {
        match self.active.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}
