//! Configuration for PathTerm.
//!
//! Keys, the store abstraction the host provides, and the typed snapshot the
//! commands read.

pub mod keys;
mod settings;
mod store;

pub use settings::{ExtensionConfig, LinuxTerminal, TerminalPreferences, WindowsTerminal};
pub use store::{ConfigError, ConfigScope, ConfigStore, ConfigStoreExt};
