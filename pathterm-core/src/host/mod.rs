//! Services the host workbench provides to PathTerm.
//!
//! Everything PathTerm does outside its own logic goes through these traits:
//! notifications, clipboard, the active editor, filesystem queries and
//! process spawning. The system implementations live in `fs` and `shell`;
//! UI-bound ones are supplied by the host.

pub mod fs;
pub mod platform;
pub mod shell;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub use fs::{FileSystem, PathKind, TokioFileSystem};
pub use platform::Platform;
pub use shell::{ProcessHandle, ShellExecutor, SpawnError, SystemShell};

// =============================================================================
// Notifications
// =============================================================================

/// Level of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Shows messages to the user.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Show a message with no actions.
    fn notify(&self, severity: Severity, message: &str);

    /// Show an informational message offering `actions`.
    ///
    /// Resolves to the chosen action, or `None` if the message was dismissed.
    async fn prompt(&self, message: &str, actions: &[&str]) -> Option<String>;
}

// =============================================================================
// Clipboard
// =============================================================================

/// Error writing to the system clipboard.
#[derive(Debug, thiserror::Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// System clipboard access.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

// =============================================================================
// Editor
// =============================================================================

/// Read access to the host editor's state.
pub trait EditorContext: Send + Sync {
    /// Path of the document in the focused editor, if any.
    fn active_document(&self) -> Option<PathBuf>;
}

// =============================================================================
// Service Bundle
// =============================================================================

/// Every host service a command may call, cheaply cloneable into tasks.
#[derive(Clone)]
pub struct HostServices {
    pub editor: Arc<dyn EditorContext>,
    pub notifier: Arc<dyn Notifier>,
    pub clipboard: Arc<dyn Clipboard>,
    pub fs: Arc<dyn FileSystem>,
    pub shell: Arc<dyn ShellExecutor>,
}

impl HostServices {
    /// Bundle UI-bound services with the system filesystem and shell.
    pub fn with_system(
        editor: Arc<dyn EditorContext>,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            editor,
            notifier,
            clipboard,
            fs: Arc::new(TokioFileSystem),
            shell: Arc::new(SystemShell),
        }
    }
}

impl fmt::Debug for HostServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostServices").finish_non_exhaustive()
    }
}
