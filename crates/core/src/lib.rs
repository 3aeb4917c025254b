//! Core library for the to-do list
//!
//! This crate contains the state and derived views behind the to-do widget:
//! - Task store with snapshot persistence
//! - Search and category filtering
//! - Completion and deadline statistics
//!
//! Rendering is left to the embedding layer, which forwards input to a
//! [`TodoSession`] (or a bare [`TaskStore`]) and renders what comes back.

pub mod category;
pub mod config;
pub mod error;
pub mod filter;
pub mod notice;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;
pub mod telemetry;

pub use category::{Category, CategoryId, CATEGORIES};
pub use config::TodoConfig;
pub use error::Error;
pub use filter::{visible_tasks, CategoryFilter, ViewFilter};
pub use notice::Notice;
pub use session::{EmptyState, TodoSession, ViewSnapshot};
pub use stats::{CategoryStats, Statistics};
pub use storage::{FileSlotStorage, MemorySlotStorage, SlotStorage};
pub use store::TaskStore;
pub use task::{Task, TaskId};

pub type Result<T> = std::result::Result<T, Error>;
