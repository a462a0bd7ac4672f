//! Server configuration from environment variables.
//!
//! - `PORT` — HTTP port (default: 3000)
//! - `SAINTS_STORE` — Storage backend: "sqlite" (default) or "memory"
//! - `SAINTS_DB_PATH` — SQLite file (default: `<data dir>/saints.db`)
//! - `SAINTS_STORAGE_DIR` — Directory name under the platform data dir (default: "saints")

use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::{ConfigError, StoreError};
use crate::store::{MemoryRecordStore, RecordStore, SqliteRecordStore};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORAGE_DIR: &str = "saints";
const DB_FILE_NAME: &str = "saints.db";

/// Where records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub store: StoreBackend,
    /// Only used with [`StoreBackend::Sqlite`].
    pub db_path: PathBuf,
}

impl ServerConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let store = match lookup("SAINTS_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("sqlite") => StoreBackend::Sqlite,
            Some("memory") => StoreBackend::Memory,
            Some(other) => {
                return Err(ConfigError::UnknownStore {
                    value: other.to_string(),
                })
            }
        };

        let db_path = match lookup("SAINTS_DB_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => {
                let storage_dir = lookup("SAINTS_STORAGE_DIR")
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_STORAGE_DIR.to_string());
                data_dir(&lookup).join(storage_dir).join(DB_FILE_NAME)
            }
        };

        Ok(Self { port, store, db_path })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Open the configured store.
    pub fn open_store(&self) -> Result<Arc<dyn RecordStore>, StoreError> {
        let store: Arc<dyn RecordStore> = match self.store {
            StoreBackend::Sqlite => Arc::new(SqliteRecordStore::new(&self.db_path)?),
            StoreBackend::Memory => Arc::new(MemoryRecordStore::new()),
        };
        Ok(store)
    }
}

/// Platform data directory.
///
/// Linux: `~/.local/share`, macOS: `~/Library/Application Support`,
/// Windows: `%LOCALAPPDATA%`.
fn data_dir<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let home = || PathBuf::from(lookup("HOME").unwrap_or_else(|| "/tmp".to_string()));

    if cfg!(target_os = "linux") {
        home().join(".local").join("share")
    } else if cfg!(target_os = "macos") {
        home().join("Library").join("Application Support")
    } else if cfg!(target_os = "windows") {
        PathBuf::from(
            lookup("LOCALAPPDATA")
                .or_else(|| lookup("APPDATA"))
                .unwrap_or_else(|| "C:\\tmp".to_string()),
        )
    } else {
        PathBuf::from("/tmp")
    }
}
