//! The fixed set of settings shown in the settings view.

use serde::Serialize;

use crate::config::keys;

/// A rendered setting: a value snapshot, discarded after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Setting {
    /// Section-relative configuration key, e.g. `path.showIcons`.
    pub key: &'static str,
    /// Display label including its glyph.
    pub label: String,
    /// Tooltip text.
    pub description: &'static str,
    pub kind: SettingKind,
}

/// Value of a setting, tagged by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SettingKind {
    Boolean {
        value: bool,
    },
    Enum {
        value: String,
        options: &'static [&'static str],
    },
}

impl Setting {
    /// Boolean value, if this is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            SettingKind::Boolean { value } => Some(value),
            SettingKind::Enum { .. } => None,
        }
    }
}

/// Declared type and default of a setting.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Declared {
    Boolean(bool),
    Enum {
        default: &'static str,
        options: &'static [&'static str],
    },
}

/// Static description of one entry in the settings view.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SettingDecl {
    pub key: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub declared: Declared,
}

impl SettingDecl {
    pub fn label(&self) -> String {
        format!("{} {}", self.icon, self.title)
    }
}

pub(crate) const WINDOWS_TERMINAL_OPTIONS: &[&str] = &["wt", "cmd", "powershell"];
pub(crate) const LINUX_TERMINAL_OPTIONS: &[&str] = &["gnome-terminal", "xterm", "konsole", "custom"];

/// Settings in display order.
pub(crate) const SETTINGS: &[SettingDecl] = &[
    SettingDecl {
        key: keys::GET_PATH_ENABLED,
        icon: "📋",
        title: "Get Path",
        description: "Enable the command that shows and copies the path of a file or folder.",
        declared: Declared::Boolean(keys::DEFAULT_GET_PATH_ENABLED),
    },
    SettingDecl {
        key: keys::OPEN_TERMINAL_ENABLED,
        icon: "💻",
        title: "Open in Terminal",
        description: "Enable the command that opens an external terminal at a file or folder.",
        declared: Declared::Boolean(keys::DEFAULT_OPEN_TERMINAL_ENABLED),
    },
    SettingDecl {
        key: keys::SHOW_ICONS,
        icon: "🎨",
        title: "Show Icons",
        description: "Prefix path messages with a file or folder icon.",
        declared: Declared::Boolean(keys::DEFAULT_SHOW_ICONS),
    },
    SettingDecl {
        key: keys::AUTO_CLIPBOARD,
        icon: "📎",
        title: "Auto Copy to Clipboard",
        description: "Copy the path immediately instead of offering a Copy button.",
        declared: Declared::Boolean(keys::DEFAULT_AUTO_CLIPBOARD),
    },
    SettingDecl {
        key: keys::TERMINAL_WINDOWS,
        icon: "🪟",
        title: "Windows Terminal",
        description: "Terminal opened on Windows.",
        declared: Declared::Enum {
            default: keys::DEFAULT_TERMINAL_WINDOWS,
            options: WINDOWS_TERMINAL_OPTIONS,
        },
    },
    SettingDecl {
        key: keys::TERMINAL_LINUX,
        icon: "🐧",
        title: "Linux Terminal",
        description: "Terminal opened on Linux. 'custom' runs terminal.customCommand.",
        declared: Declared::Enum {
            default: keys::DEFAULT_TERMINAL_LINUX,
            options: LINUX_TERMINAL_OPTIONS,
        },
    },
];

/// Look up a declaration by section-relative key.
pub(crate) fn find(key: &str) -> Option<&'static SettingDecl> {
    SETTINGS.iter().find(|decl| decl.key == key)
}
