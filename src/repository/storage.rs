//! Key-value slot backends.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::repository::SlotStorage;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`. Keys must be plain file stems.
    pub fn slot_path(&self, key: &str) -> RepositoryResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(RepositoryError::ValidationError(format!(
                "invalid storage key: {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read_slot(&self, key: &str) -> RepositoryResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write_slot(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)?;

        // Readers never observe a half-written slot.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// Process-local slots, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key` with `value`.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.slots.borrow_mut().insert(key.into(), value.into());
        storage
    }

    /// Current content of `key`.
    pub fn slot(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read_slot(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.slot(key))
    }

    fn write_slot(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
