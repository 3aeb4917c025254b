//! Task module
//!
//! This module contains the task record, its identifiers and the persisted
//! record shape.

mod id;
mod model;

pub use id::{IdGenerator, TaskId};
pub use model::Task;
