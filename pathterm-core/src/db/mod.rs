//! SQLite database layer for PathTerm.
//!
//! Backs the host configuration store: scoped key-value settings persisted
//! across sessions.

mod migrations;

use rusqlite::{Connection, OptionalExtension};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

use crate::config::{ConfigError, ConfigScope, ConfigStore};

/// Database connection wrapper.
///
/// Provides a high-level API for interacting with the SQLite database.
/// Automatically handles connection setup, migrations, and file permissions.
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Default path: `~/.local/share/pathterm/pathterm.db`
    pub fn open() -> anyhow::Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(path)
    }

    /// Open the database at a specific path.
    ///
    /// Creates parent directories if they don't exist.
    /// Sets file permissions to 0600 on Unix.
    pub fn open_at(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
            {
                tracing::warn!(path = %path.display(), error = %e, "Failed to set database file permissions");
            }
        }

        Ok(Self { conn, path })
    }

    /// Open a throwaway in-memory database.
    ///
    /// Used when the on-disk database is unavailable; nothing survives the session.
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    /// Get the default database path.
    ///
    /// Returns `~/.local/share/pathterm/pathterm.db` (or platform equivalent).
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".local/share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(data_dir.join("pathterm").join("pathterm.db"))
    }

    /// Run database migrations.
    ///
    /// Safe to call multiple times - migrations are tracked and only run once.
    pub fn migrate(&self) -> anyhow::Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get the database file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    // =========================================================================
    // Settings Storage
    // =========================================================================

    /// Save a raw setting at `scope` (upsert).
    pub fn set_setting(
        &self,
        key: &str,
        scope: ConfigScope,
        value: &str,
    ) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO settings (key, scope, value, updated_at) VALUES (?, ?, ?, unixepoch())
             ON CONFLICT(key, scope) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            [key, scope.as_str(), value],
        )?;
        Ok(())
    }

    /// Get the raw setting stored at exactly `scope`.
    pub fn get_setting(
        &self,
        key: &str,
        scope: ConfigScope,
    ) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT value FROM settings WHERE key = ? AND scope = ?",
                [key, scope.as_str()],
                |row| row.get(0),
            )
            .optional()
    }

    /// Get the effective raw setting, preferring workspace over global.
    pub fn get_effective_setting(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        for scope in ConfigScope::precedence() {
            if let Some(value) = self.get_setting(key, *scope)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Delete a setting at `scope`. No-op if it doesn't exist.
    pub fn delete_setting(&self, key: &str, scope: ConfigScope) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "DELETE FROM settings WHERE key = ? AND scope = ?",
            [key, scope.as_str()],
        )?;
        Ok(())
    }

    /// List all keys with a value in any scope, sorted.
    pub fn list_setting_keys(&self) -> Result<Vec<String>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT key FROM settings ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect()
    }
}

impl ConfigStore for Database {
    fn get(&self, key: &str) -> Result<Option<JsonValue>, ConfigError> {
        let Some(raw) = self.get_effective_setting(key)? else {
            return Ok(None);
        };
        decode(key, &raw).map(Some)
    }

    fn get_at(&self, key: &str, scope: ConfigScope) -> Result<Option<JsonValue>, ConfigError> {
        let Some(raw) = self.get_setting(key, scope)? else {
            return Ok(None);
        };
        decode(key, &raw).map(Some)
    }

    fn set(&self, key: &str, value: JsonValue, scope: ConfigScope) -> Result<(), ConfigError> {
        self.set_setting(key, scope, &value.to_string())?;
        tracing::debug!(key, %scope, %value, "Configuration updated");
        Ok(())
    }
}

fn decode(key: &str, raw: &str) -> Result<JsonValue, ConfigError> {
    serde_json::from_str(raw).map_err(|source| ConfigError::Corrupt {
        key: key.to_string(),
        source,
    })
}

// =============================================================================
// Tests
// =============================================================================
