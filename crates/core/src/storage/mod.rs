//! Snapshot storage
//!
//! Storage is a set of named slots, each holding one serialized snapshot that
//! is read once at startup and overwritten wholesale after every mutation.

mod file_store;
mod memory;

pub use file_store::FileSlotStorage;
pub use memory::MemorySlotStorage;

use crate::Result;

/// Interface for named-slot snapshot storage
pub trait SlotStorage {
    /// Read the slot contents, `None` when nothing was ever written
    fn read_slot(&self, slot: &str) -> Result<Option<String>>;

    /// Overwrite the slot contents
    fn write_slot(&self, slot: &str, contents: &str) -> Result<()>;
}

impl<S: SlotStorage + ?Sized> SlotStorage for &S {
    fn read_slot(&self, slot: &str) -> Result<Option<String>> {
        (**self).read_slot(slot)
    }

    fn write_slot(&self, slot: &str, contents: &str) -> Result<()> {
        (**self).write_slot(slot, contents)
    }
}
