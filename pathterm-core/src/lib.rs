//! PathTerm Core Library
//!
//! This crate provides the core functionality for PathTerm, an add-on that
//! copies file and folder paths and opens external terminals. It includes:
//!
//! - Configuration keys, typed settings and the `ConfigStore` abstraction
//! - Database layer persisting settings per scope
//! - Settings view model with change notifications
//! - Get-path and open-terminal command dispatchers
//! - Host service traits (notifications, clipboard, filesystem, shell)

pub mod commands;
pub mod config;
pub mod db;
pub mod extension;
pub mod host;
pub mod view;

// Re-exports for convenience
pub use config::{ConfigScope, ConfigStore, ConfigStoreExt, ExtensionConfig};
pub use db::Database;
pub use extension::{Execution, Extension};

// Re-export commands
pub use commands::{
    build_terminal_command, CommandId, DispatchError, Invocation, InvocationSource, PathRef,
    PathReport, TerminalLaunch,
};

// Re-export host services
pub use host::{
    Clipboard, ClipboardError, EditorContext, HostServices, Notifier, PathKind, Platform,
    Severity,
};

// Re-export settings view
pub use view::{Setting, SettingKind, SettingsError, SettingsEvent, SettingsView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
