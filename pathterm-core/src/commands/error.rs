//! Errors ending a command invocation.

use std::fmt;
use std::path::PathBuf;

use crate::host::{ClipboardError, Severity, SpawnError};

/// A feature that can be switched off in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    GetPath,
    OpenTerminal,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GetPath => write!(f, "Get Path"),
            Self::OpenTerminal => write!(f, "Open in Terminal"),
        }
    }
}

/// Why a command stopped. Every variant ends only the current invocation.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{0} is disabled. Enable it in the PathTerm settings.")]
    FeatureDisabled(Feature),

    #[error("No file or folder selected and no active editor.")]
    NoTarget,

    #[error("Cannot access {}: {source}", .path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No custom terminal command configured. Set pathterm.terminal.customCommand.")]
    MissingCustomCommand,

    #[error("Failed to open terminal: {0}")]
    Spawn(#[from] SpawnError),

    #[error("Failed to copy path: {0}")]
    Clipboard(#[from] ClipboardError),
}

impl DispatchError {
    /// Notification level used to report this error.
    pub fn severity(&self) -> Severity {
        match self {
            Self::FeatureDisabled(_) | Self::NoTarget => Severity::Warning,
            Self::Inspect { .. }
            | Self::MissingCustomCommand
            | Self::Spawn(_)
            | Self::Clipboard(_) => Severity::Error,
        }
    }
}
