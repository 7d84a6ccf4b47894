//! File-backed key-value store.
//!
//! Values are plain strings keyed by name, held in a single JSON object on
//! disk. The file is read once when the store is opened and rewritten
//! wholesale on every mutation; there are no incremental updates and no
//! schema versioning.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl KvStore {
    /// Open the store at `path`. A missing file yields an empty store; a
    /// file that exists but does not parse is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("failed to read store file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("store file {} is not valid JSON", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "store file missing, starting empty");
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Set `key` to `value` and rewrite the store file.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.into(), value.into());
        self.flush()
    }

    /// Remove `key`, rewriting the store file. Returns the previous value.
    pub fn remove(&mut self, key: &str) -> Result<Option<String>> {
        let previous = self.entries.remove(key);
        if previous.is_some() {
            self.flush()?;
        }
        Ok(previous)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create store directory {}", parent.display())
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(&self.entries)
            .context("failed to serialize store contents")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write store file {}", self.path.display()))?;

        tracing::trace!(path = %self.path.display(), entries = self.entries.len(), "store flushed");
        Ok(())
    }
}
