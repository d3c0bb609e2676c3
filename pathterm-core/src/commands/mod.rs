//! Commands PathTerm exposes to the host.
//!
//! - `path`: show and copy the path of a file or folder
//! - `terminal`: open an external terminal at a file or folder
//!
//! Both resolve their target the same way: an explicit reference from the
//! invoking UI element wins, otherwise the active document is used.

mod error;
pub mod path;
pub mod terminal;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::host::{EditorContext, Notifier, Severity};

pub use error::{DispatchError, Feature};
pub use path::{format_path_message, get_current_path, PathReport, COPY_ACTION};
pub use terminal::{build_terminal_command, open_in_external_terminal, TerminalLaunch};

// =============================================================================
// Command Identifiers
// =============================================================================

/// Stable command ids registered with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    RefreshSettingsView,
    ToggleFeature,
    GetCurrentPath,
    OpenInExternalTerminal,
}

impl CommandId {
    pub fn all() -> &'static [CommandId] {
        &[
            Self::RefreshSettingsView,
            Self::ToggleFeature,
            Self::GetCurrentPath,
            Self::OpenInExternalTerminal,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RefreshSettingsView => "pathterm.refreshSettingsView",
            Self::ToggleFeature => "pathterm.toggleFeature",
            Self::GetCurrentPath => "pathterm.getCurrentPath",
            Self::OpenInExternalTerminal => "pathterm.openInExternalTerminal",
        }
    }

    /// Title shown in menus.
    pub fn title(&self) -> &'static str {
        match self {
            Self::RefreshSettingsView => "Refresh Settings",
            Self::ToggleFeature => "Toggle Feature",
            Self::GetCurrentPath => "Get Current Path",
            Self::OpenInExternalTerminal => "Open in External Terminal",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CommandId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown command: {}", s))
    }
}

/// A command with its argument, ready to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    RefreshSettingsView,
    ToggleFeature(String),
    GetCurrentPath(Option<PathRef>),
    OpenInExternalTerminal(Option<PathRef>),
}

impl Invocation {
    pub fn id(&self) -> CommandId {
        match self {
            Self::RefreshSettingsView => CommandId::RefreshSettingsView,
            Self::ToggleFeature(_) => CommandId::ToggleFeature,
            Self::GetCurrentPath(_) => CommandId::GetCurrentPath,
            Self::OpenInExternalTerminal(_) => CommandId::OpenInExternalTerminal,
        }
    }
}

// =============================================================================
// Target Resolution
// =============================================================================

/// Explicit path handed over by the invoking UI element (explorer entry,
/// editor tab).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathRef(PathBuf);

impl PathRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl From<PathBuf> for PathRef {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

/// How the command was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationSource {
    /// From a context menu, with an explicit target.
    ContextMenu,
    /// From the command menu/palette, acting on the active document.
    CommandPalette,
}

/// Pick the command target: explicit reference, else active document.
pub(crate) fn resolve_target(
    target: Option<PathRef>,
    editor: &dyn EditorContext,
) -> Result<(PathBuf, InvocationSource), DispatchError> {
    if let Some(target) = target {
        return Ok((target.into_path(), InvocationSource::ContextMenu));
    }
    match editor.active_document() {
        Some(path) => Ok((path, InvocationSource::CommandPalette)),
        None => Err(DispatchError::NoTarget),
    }
}

/// Log `err` and show it to the user at its severity.
pub(crate) fn report_failure(notifier: &dyn Notifier, command: CommandId, err: &DispatchError) {
    match err.severity() {
        Severity::Error => error!(%command, error = %err, "Command failed"),
        Severity::Warning => warn!(%command, reason = %err, "Command aborted"),
        Severity::Info => debug!(%command, reason = %err, "Command stopped"),
    }
    notifier.notify(err.severity(), &err.to_string());
}
