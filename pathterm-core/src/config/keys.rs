//! Configuration keys and their defaults.
//!
//! Keys here are relative to [`SECTION`]; use [`qualified`] before handing
//! them to a store.

/// Namespace every PathTerm key lives under.
pub const SECTION: &str = "pathterm";

pub const GET_PATH_ENABLED: &str = "features.getPathEnabled";
pub const OPEN_TERMINAL_ENABLED: &str = "features.openTerminalEnabled";
pub const SHOW_ICONS: &str = "path.showIcons";
pub const AUTO_CLIPBOARD: &str = "path.autoClipboard";
pub const TERMINAL_WINDOWS: &str = "terminal.windows";
pub const TERMINAL_LINUX: &str = "terminal.linux";
pub const TERMINAL_CUSTOM_COMMAND: &str = "terminal.customCommand";

pub const DEFAULT_GET_PATH_ENABLED: bool = true;
pub const DEFAULT_OPEN_TERMINAL_ENABLED: bool = true;
pub const DEFAULT_SHOW_ICONS: bool = true;
pub const DEFAULT_AUTO_CLIPBOARD: bool = false;
pub const DEFAULT_TERMINAL_WINDOWS: &str = "wt";
pub const DEFAULT_TERMINAL_LINUX: &str = "gnome-terminal";
pub const DEFAULT_TERMINAL_CUSTOM_COMMAND: &str = "";

/// Placeholder substituted with the target directory in custom commands.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Prefix a section-relative key with [`SECTION`].
pub fn qualified(key: &str) -> String {
    format!("{SECTION}.{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_prefixes_section() {
        assert_eq!(qualified(SHOW_ICONS), "pathterm.path.showIcons");
    }
}
