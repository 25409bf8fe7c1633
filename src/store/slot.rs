//! Named key-value slots backing the ticket store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{DeskError, Result};
use crate::utils::write_atomic;

/// A key-value store of text slots
pub trait SlotStore {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace a slot's value
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Slot keys become file names, so they are restricted to a safe alphabet
pub fn validate_slot_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(DeskError::Config("storage key cannot be empty".to_string()));
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DeskError::Config(format!(
            "storage key '{key}' contains invalid characters. Use only letters, numbers, hyphens, and underscores"
        )));
    }
    Ok(())
}

/// One JSON file per slot under a directory
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSlotStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        validate_slot_key(key)?;
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(|e| {
            DeskError::PersistenceRead(format!("failed to read {}: {}", path.display(), e))
        })
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        validate_slot_key(key)?;
        let path = self.path_for(key);
        write_atomic(&path, value.as_bytes()).map_err(|e| {
            DeskError::PersistenceWrite(format!("failed to write {}: {}", path.display(), e))
        })
    }
}

/// In-memory slots. Clones share the same entries, so a test can keep a handle
/// after giving one to a store.
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a slot
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Make every following write fail, as a full browser quota would
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes.get() {
            return Err(DeskError::PersistenceWrite(format!(
                "quota exceeded while writing '{key}'"
            )));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
