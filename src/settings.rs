//! Small persisted key-value settings.
//!
//! Keys carry an explicit schema version so a changed meaning gets a fresh
//! key instead of reinterpreting an old value.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Setting name plus schema version, stored as `{name}_v{version}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SettingKey {
    name: String,
    version: u32,
}

impl SettingKey {
    #[must_use]
    pub fn versioned(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    #[must_use]
    pub fn storage_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_v{}", self.name, self.version)
    }
}

/// String-valued settings storage.
pub trait SettingsStore {
    fn get(&self, key: &str) -> ChartResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ChartResult<()>;
    fn remove(&mut self, key: &str) -> ChartResult<()>;
}

impl<T: SettingsStore + ?Sized> SettingsStore for Box<T> {
    fn get(&self, key: &str) -> ChartResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> ChartResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> ChartResult<()> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettingsStore {
    entries: IndexMap<String, String>,
}

impl MemorySettingsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> ChartResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ChartResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> ChartResult<()> {
        self.entries.shift_remove(key);
        Ok(())
    }
}

/// Settings kept in a JSON object file, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    entries: IndexMap<String, String>,
}

impl JsonFileSettingsStore {
    /// Opens the file, starting empty when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> ChartResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                ChartError::Storage(format!("failed to read `{}`: {e}", path.display()))
            })?;
            if raw.trim().is_empty() {
                IndexMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    ChartError::Storage(format!("invalid settings json `{}`: {e}", path.display()))
                })?
            }
        } else {
            IndexMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "settings loaded");
        Ok(Self { path, entries })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> ChartResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    ChartError::Storage(format!("failed to create `{}`: {e}", parent.display()))
                })?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| ChartError::Storage(format!("failed to encode settings: {e}")))?;
        // Staged beside the target and renamed over it: readers see the old or the new file.
        let staging = self.staging_path();
        fs::write(&staging, raw).map_err(|e| {
            ChartError::Storage(format!("failed to write `{}`: {e}", staging.display()))
        })?;
        fs::rename(&staging, &self.path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            ChartError::Storage(format!("failed to replace `{}`: {e}", self.path.display()))
        })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn get(&self, key: &str) -> ChartResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ChartResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> ChartResult<()> {
        if self.entries.shift_remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
