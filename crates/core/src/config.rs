//! Configuration
//!
//! Read from `TODO_*` environment variables. Unset, blank or malformed values
//! fall back to defaults.

use std::path::PathBuf;

use chrono::Duration;

use crate::storage::FileSlotStorage;
use crate::store::TaskStore;
use crate::telemetry;

pub const DEFAULT_DATA_DIR: &str = ".todo-data";
pub const DEFAULT_SLOT: &str = "todos";
pub const DEFAULT_NOTICE_MS: i64 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "todo_core=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Directory for file-backed slots (`TODO_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Slot holding the task snapshot (`TODO_STORAGE_SLOT`)
    pub slot_name: String,
    /// How long validation notices stay visible (`TODO_NOTICE_MS`)
    pub notice_duration: Duration,
    /// Fallback tracing directive when `RUST_LOG` is unset (`TODO_LOG`)
    pub log_filter: String,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            slot_name: DEFAULT_SLOT.to_string(),
            notice_duration: Duration::milliseconds(DEFAULT_NOTICE_MS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TodoConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let notice_duration = var("TODO_NOTICE_MS")
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|ms| *ms >= 0)
            .map(Duration::milliseconds)
            .unwrap_or(defaults.notice_duration);

        Self {
            data_dir: var("TODO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            slot_name: var("TODO_STORAGE_SLOT").unwrap_or(defaults.slot_name),
            notice_duration,
            log_filter: var("TODO_LOG").unwrap_or(defaults.log_filter),
        }
    }

    /// Install the global tracing subscriber with the configured fallback filter
    pub fn init_tracing(&self) -> bool {
        telemetry::init_tracing(&self.log_filter)
    }

    pub fn storage(&self) -> FileSlotStorage {
        FileSlotStorage::new(&self.data_dir)
    }

    /// Load the task store from the configured slot
    pub fn open_store(&self) -> TaskStore<FileSlotStorage> {
        TaskStore::load(self.storage(), self.slot_name.clone())
    }
}
