//! Error types for the core library

use thiserror::Error;

use crate::task::TaskId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("empty task text")]
    EmptyTaskText,

    #[error("Unknown category: {0}")]
    UnknownCategory(u32),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Whether the error rejects user input (as opposed to a missing task or
    /// a storage failure).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyTaskText | Self::UnknownCategory(_))
    }
}
