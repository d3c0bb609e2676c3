//! Configuration store abstraction.
//!
//! The host owns configuration. PathTerm only sees a key-value store with
//! scoped writes; values travel as JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

// =============================================================================
// Scope
// =============================================================================

/// Where a configuration value is written.
///
/// Reads resolve `Workspace` before `Global`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    /// User-wide value.
    #[default]
    Global,
    /// Value for the currently open workspace only.
    Workspace,
}

impl ConfigScope {
    /// Scopes in read precedence order (most specific first).
    pub fn precedence() -> &'static [ConfigScope] {
        &[Self::Workspace, Self::Global]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Workspace => "workspace",
        }
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by a configuration store.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration storage failed: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("stored value for '{key}' is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

// =============================================================================
// Store Trait
// =============================================================================

/// Host-provided configuration store.
///
/// Keys are fully qualified (`pathterm.features.getPathEnabled`). Writes are
/// last-writer-wins per key.
pub trait ConfigStore {
    /// Read the effective value of `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<JsonValue>, ConfigError>;

    /// Read the value written at exactly `scope`, ignoring other scopes.
    fn get_at(&self, key: &str, scope: ConfigScope) -> Result<Option<JsonValue>, ConfigError>;

    /// Write `value` for `key` at `scope`.
    fn set(&self, key: &str, value: JsonValue, scope: ConfigScope) -> Result<(), ConfigError>;
}

/// Typed helpers over any [`ConfigStore`].
pub trait ConfigStoreExt: ConfigStore {
    /// Read `key` as `T`, falling back to `default` when the key is absent,
    /// unreadable, or holds a value of the wrong type.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        typed_or(key, self.get(key), default)
    }

    /// Like [`get_or`](Self::get_or), but reads only the value at `scope`.
    fn get_at_or<T: DeserializeOwned>(&self, key: &str, scope: ConfigScope, default: T) -> T {
        typed_or(key, self.get_at(key, scope), default)
    }

    /// Read a boolean flag with a default.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_or(key, default)
    }

    /// Read a string value with a default.
    fn get_string(&self, key: &str, default: &str) -> String {
        self.get_or(key, default.to_string())
    }
}

impl<S: ConfigStore + ?Sized> ConfigStoreExt for S {}

fn typed_or<T: DeserializeOwned>(
    key: &str,
    read: Result<Option<JsonValue>, ConfigError>,
    default: T,
) -> T {
    match read {
        Ok(Some(value)) => match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(key, error = %e, "Ignoring configuration value of unexpected type");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read configuration, using default");
            default
        }
    }
}
