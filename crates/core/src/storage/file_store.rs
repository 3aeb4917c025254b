//! File-based slot storage
//!
//! Stores each slot as `<slot>.json` in a directory on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::SlotStorage;
use crate::{Error, Result};

/// File-based slot storage
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    /// Directory holding the slot files
    base_dir: PathBuf,
}

impl FileSlotStorage {
    /// Create a new FileSlotStorage
    ///
    /// The directory is created on first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file backing `slot`
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !slot.starts_with('.');
        if !valid {
            return Err(Error::InvalidInput(format!("Invalid slot name: {:?}", slot)));
        }
        Ok(self.base_dir.join(format!("{}.json", slot)))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_slot(&self, slot: &str, contents: &str) -> Result<()> {
        let path = self.slot_path(slot)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("Failed to create directory: {}", e))
            })?;
        }

        fs::write(&path, contents)
            .map_err(|e| Error::Storage(format!("Failed to write slot file: {}", e)))?;

        debug!("Wrote slot {} to {}", slot, path.display());
        Ok(())
    }
}
