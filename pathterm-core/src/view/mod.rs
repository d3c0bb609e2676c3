//! Settings view model.
//!
//! Lists the PathTerm settings with their current values, toggles flags and
//! tells subscribers when the list must be rebuilt. The list is read from the
//! store on every call; nothing is cached here.

mod registry;

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::{keys, ConfigError, ConfigScope, ConfigStore, ConfigStoreExt};
use crate::host::{Notifier, Severity};

pub use registry::{Setting, SettingKind};
use registry::{Declared, SETTINGS};

/// Buffered events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 32;

/// Change notification for the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Re-query the whole list.
    Refreshed,
    /// `key` was written through the view.
    Changed { key: String },
}

/// Errors from settings mutations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("setting '{0}' is not a boolean flag")]
    NotToggleable(String),

    #[error("setting '{0}' has no fixed set of options")]
    NotSelectable(String),

    #[error("'{option}' is not a valid value for '{key}'")]
    InvalidOption { key: String, option: String },

    #[error(transparent)]
    Store(#[from] ConfigError),
}

/// View model behind the settings panel.
pub struct SettingsView {
    events: broadcast::Sender<SettingsEvent>,
    notifier: Arc<dyn Notifier>,
}

impl SettingsView {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { events, notifier }
    }

    /// Receive change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.events.subscribe()
    }

    /// Current settings in declaration order.
    pub fn list_settings<S: ConfigStore + ?Sized>(&self, store: &S) -> Vec<Setting> {
        SETTINGS
            .iter()
            .map(|decl| {
                let qualified = keys::qualified(decl.key);
                let kind = match decl.declared {
                    Declared::Boolean(default) => SettingKind::Boolean {
                        value: store.get_bool(&qualified, default),
                    },
                    Declared::Enum { default, options } => SettingKind::Enum {
                        value: store.get_string(&qualified, default),
                        options,
                    },
                };
                Setting {
                    key: decl.key,
                    label: decl.label(),
                    description: decl.description,
                    kind,
                }
            })
            .collect()
    }

    /// Flip a boolean setting, write it globally and refresh.
    ///
    /// The flip is based on the global value, so a workspace override never
    /// turns the toggle into a no-op. Returns the new global value.
    pub fn toggle<S: ConfigStore + ?Sized>(
        &self,
        store: &S,
        key: &str,
    ) -> Result<bool, SettingsError> {
        let decl = registry::find(key).ok_or_else(|| {
            warn!(key, "Toggle requested for unknown setting");
            SettingsError::UnknownSetting(key.to_string())
        })?;
        let Declared::Boolean(default) = decl.declared else {
            warn!(key, "Toggle requested for non-boolean setting");
            return Err(SettingsError::NotToggleable(key.to_string()));
        };

        let qualified = keys::qualified(key);
        let enabled = !store.get_at_or(&qualified, ConfigScope::Global, default);
        store.set(&qualified, JsonValue::Bool(enabled), ConfigScope::Global)?;
        info!(key, enabled, "Setting toggled");

        self.changed(key);
        let state = if enabled { "enabled" } else { "disabled" };
        self.notifier
            .notify(Severity::Info, &format!("{} {}", decl.title, state));

        Ok(enabled)
    }

    /// Set an enum setting to one of its declared options and refresh.
    pub fn select<S: ConfigStore + ?Sized>(
        &self,
        store: &S,
        key: &str,
        option: &str,
    ) -> Result<(), SettingsError> {
        let decl = registry::find(key).ok_or_else(|| SettingsError::UnknownSetting(key.to_string()))?;
        let Declared::Enum { options, .. } = decl.declared else {
            return Err(SettingsError::NotSelectable(key.to_string()));
        };
        if !options.contains(&option) {
            return Err(SettingsError::InvalidOption {
                key: key.to_string(),
                option: option.to_string(),
            });
        }

        store.set(
            &keys::qualified(key),
            JsonValue::String(option.to_string()),
            ConfigScope::Global,
        )?;
        info!(key, option, "Setting selected");

        self.changed(key);
        self.notifier
            .notify(Severity::Info, &format!("{} set to {}", decl.title, option));
        Ok(())
    }

    /// Store the custom terminal command template. Not validated.
    pub fn set_custom_command<S: ConfigStore + ?Sized>(
        &self,
        store: &S,
        template: &str,
    ) -> Result<(), SettingsError> {
        store.set(
            &keys::qualified(keys::TERMINAL_CUSTOM_COMMAND),
            JsonValue::String(template.to_string()),
            ConfigScope::Global,
        )?;
        self.changed(keys::TERMINAL_CUSTOM_COMMAND);
        Ok(())
    }

    /// Ask subscribers to re-query the list.
    pub fn refresh(&self) {
        // No subscribers is fine; the next render reads fresh values anyway.
        let receivers = self.events.send(SettingsEvent::Refreshed).unwrap_or(0);
        debug!(receivers, "Settings view refreshed");
    }

    fn changed(&self, key: &str) {
        let _ = self.events.send(SettingsEvent::Changed {
            key: key.to_string(),
        });
        self.refresh();
    }
}

// =============================================================================
// Tests
// =============================================================================
