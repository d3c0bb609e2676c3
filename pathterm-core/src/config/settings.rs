//! Typed configuration snapshot for PathTerm.
//!
//! Values are read from the host's configuration store at the moment a
//! command runs and are never written back from here.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::keys;
use super::store::{ConfigStore, ConfigStoreExt};

// =============================================================================
// Terminal Preferences
// =============================================================================

/// Terminal used on Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowsTerminal {
    /// Windows Terminal (`wt`).
    #[default]
    Wt,
    /// Command Prompt.
    Cmd,
    /// Windows PowerShell.
    PowerShell,
}

impl WindowsTerminal {
    pub fn all() -> &'static [WindowsTerminal] {
        &[Self::Wt, Self::Cmd, Self::PowerShell]
    }

    /// Value as stored in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wt => "wt",
            Self::Cmd => "cmd",
            Self::PowerShell => "powershell",
        }
    }
}

impl fmt::Display for WindowsTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WindowsTerminal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown Windows terminal: {}", s))
    }
}

/// Terminal used on Linux and other freedesktop systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LinuxTerminal {
    #[default]
    GnomeTerminal,
    Xterm,
    Konsole,
    /// User-supplied command template.
    Custom,
}

impl LinuxTerminal {
    pub fn all() -> &'static [LinuxTerminal] {
        &[Self::GnomeTerminal, Self::Xterm, Self::Konsole, Self::Custom]
    }

    /// Value as stored in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GnomeTerminal => "gnome-terminal",
            Self::Xterm => "xterm",
            Self::Konsole => "konsole",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for LinuxTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LinuxTerminal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown Linux terminal: {}", s))
    }
}

/// Terminal choices for every platform.
///
/// `None` means the stored preference was empty or unrecognised; the command
/// builder then falls back to trying the known terminals in turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalPreferences {
    pub windows: Option<WindowsTerminal>,
    pub linux: Option<LinuxTerminal>,
    /// Template for `LinuxTerminal::Custom`, with `{path}` placeholders.
    pub custom_command: String,
}

impl Default for TerminalPreferences {
    fn default() -> Self {
        Self {
            windows: Some(WindowsTerminal::default()),
            linux: Some(LinuxTerminal::default()),
            custom_command: keys::DEFAULT_TERMINAL_CUSTOM_COMMAND.to_string(),
        }
    }
}

// =============================================================================
// Extension Configuration
// =============================================================================

/// Snapshot of every PathTerm configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionConfig {
    /// Whether the get-path command runs at all.
    pub get_path_enabled: bool,

    /// Whether the open-terminal command runs at all.
    pub open_terminal_enabled: bool,

    /// Prefix path messages with a file/folder glyph.
    pub show_icons: bool,

    /// Copy the path without asking.
    pub auto_clipboard: bool,

    pub terminal: TerminalPreferences,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            get_path_enabled: keys::DEFAULT_GET_PATH_ENABLED,
            open_terminal_enabled: keys::DEFAULT_OPEN_TERMINAL_ENABLED,
            show_icons: keys::DEFAULT_SHOW_ICONS,
            auto_clipboard: keys::DEFAULT_AUTO_CLIPBOARD,
            terminal: TerminalPreferences::default(),
        }
    }
}

impl ExtensionConfig {
    /// Read the current configuration, using defaults for missing or
    /// malformed values.
    pub fn load<S: ConfigStore + ?Sized>(store: &S) -> Self {
        let read_bool = |key: &str, default: bool| store.get_bool(&keys::qualified(key), default);
        let read_string = |key: &str, default: &str| store.get_string(&keys::qualified(key), default);

        let windows_raw = read_string(keys::TERMINAL_WINDOWS, keys::DEFAULT_TERMINAL_WINDOWS);
        let linux_raw = read_string(keys::TERMINAL_LINUX, keys::DEFAULT_TERMINAL_LINUX);

        Self {
            get_path_enabled: read_bool(keys::GET_PATH_ENABLED, keys::DEFAULT_GET_PATH_ENABLED),
            open_terminal_enabled: read_bool(
                keys::OPEN_TERMINAL_ENABLED,
                keys::DEFAULT_OPEN_TERMINAL_ENABLED,
            ),
            show_icons: read_bool(keys::SHOW_ICONS, keys::DEFAULT_SHOW_ICONS),
            auto_clipboard: read_bool(keys::AUTO_CLIPBOARD, keys::DEFAULT_AUTO_CLIPBOARD),
            terminal: TerminalPreferences {
                windows: parse_preference(keys::TERMINAL_WINDOWS, &windows_raw),
                linux: parse_preference(keys::TERMINAL_LINUX, &linux_raw),
                custom_command: read_string(
                    keys::TERMINAL_CUSTOM_COMMAND,
                    keys::DEFAULT_TERMINAL_CUSTOM_COMMAND,
                ),
            },
        }
    }
}

/// Parse a stored terminal preference; empty or unknown values become `None`.
fn parse_preference<T: std::str::FromStr>(key: &str, raw: &str) -> Option<T> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::debug!(key, value = raw, "Unrecognised terminal preference, using fallback");
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
