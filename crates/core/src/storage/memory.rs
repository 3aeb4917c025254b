//! In-memory slot storage
//!
//! Keeps slots in a map. Useful as a test double: it counts writes and can be
//! switched into a failing mode to simulate an unavailable backend.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::SlotStorage;
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    failing: Cell<bool>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that starts with `contents` in `slot`
    pub fn with_slot(slot: impl Into<String>, contents: impl Into<String>) -> Self {
        let storage = Self::new();
        storage
            .slots
            .borrow_mut()
            .insert(slot.into(), contents.into());
        storage
    }

    /// Current slot contents, bypassing the failure switch
    pub fn contents(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }

    /// Number of successful writes
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Make every subsequent read and write fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        if self.failing.get() {
            return Err(Error::Storage(format!("slot {} is unavailable", slot)));
        }
        Ok(self.contents(slot))
    }

    fn write_slot(&self, slot: &str, contents: &str) -> Result<()> {
        if self.failing.get() {
            return Err(Error::Storage(format!("slot {} is unavailable", slot)));
        }
        self.slots
            .borrow_mut()
            .insert(slot.to_string(), contents.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
