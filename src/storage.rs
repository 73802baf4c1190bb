//! Key-value persistence for the habit tracker
//!
//! Everything is stored as JSON strings under a small, stable key space:
//!
//! - `tasks`: JSON array of tasks
//! - `daylogs_v1`: legacy unsharded day-log blob (migrated away on first access)
//! - `daylogs_v1_backup`: verbatim copy of the legacy blob, never auto-deleted
//! - `daylogs_v2_<YYYY-MM>`: one shard per month, JSON object date → day log
//!
//! Backends implement [`KeyValueStore`]. [`Storage`] wraps a backend together
//! with the clock and the one-shot migration latch.

use crate::clock::{Clock, SystemClock};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const TASKS_KEY: &str = "tasks";
pub const LEGACY_DAY_LOGS_KEY: &str = "daylogs_v1";
pub const LEGACY_BACKUP_KEY: &str = "daylogs_v1_backup";
pub const DAY_LOG_SHARD_PREFIX: &str = "daylogs_v2_";

/// Minimal synchronous key-value backend
///
/// Reads never fail: a missing key is `None`. Writes may fail for backends
/// that touch the filesystem.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn keys(&self) -> Vec<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored entry
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// On-disk envelope for [`FileStore`]
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Single-file TOML backend
///
/// The whole key space is held in memory and the file is replaced on every
/// write. A missing file opens as an empty store.
pub struct FileStore {
    file_path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        let entries = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .with_context(|| format!("Failed to read {}", file_path.display()))?;
            let file: StoreFile = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", file_path.display()))?;
            file.entries
        } else {
            BTreeMap::new()
        };
        Ok(Self { file_path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn flush(&self) -> Result<()> {
        let file = StoreFile {
            entries: self.entries.clone(),
        };
        let content = toml::to_string_pretty(&file)?;

        // Temp file in the same directory, renamed over the target
        let dir = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", tmp.path().display()))?;
        tmp.persist(&self.file_path)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Storage handle shared by the task registry and the day log store
pub struct Storage<B: KeyValueStore> {
    backend: B,
    clock: Box<dyn Clock>,
    /// Set once the legacy day-log migration has run for this handle
    pub(crate) day_logs_migrated: bool,
}

impl<B: KeyValueStore> Storage<B> {
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, Box::new(SystemClock))
    }

    pub fn with_clock(backend: B, clock: Box<dyn Clock>) -> Self {
        Self {
            backend,
            clock,
            day_logs_migrated: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.backend.get(key)
    }

    pub fn set_raw(&mut self, key: &str, value: String) -> Result<()> {
        self.backend.set(key, value)
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        self.backend.remove(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.backend.keys()
    }

    /// Read and parse a JSON value; missing or malformed data reads as `None`
    pub fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "ignoring malformed stored value");
                None
            }
        }
    }

    pub fn write_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize value for '{}'", key))?;
        self.backend.set(key, raw)
    }
}
