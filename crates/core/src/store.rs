//! Task store
//!
//! Holds the ordered task collection and writes a full snapshot to its slot
//! storage after every successful mutation. Snapshot writes are best effort:
//! a failing backend is logged and never surfaces to the caller.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::category::{self, CategoryId};
use crate::filter::{self, ViewFilter};
use crate::stats::Statistics;
use crate::storage::SlotStorage;
use crate::task::{IdGenerator, Task, TaskId};
use crate::{Error, Result};

/// Ordered task collection backed by a storage slot
#[derive(Debug)]
pub struct TaskStore<S> {
    tasks: Vec<Task>,
    ids: IdGenerator,
    storage: S,
    slot: String,
}

impl<S: SlotStorage> TaskStore<S> {
    /// Load the last snapshot from `slot`.
    ///
    /// Missing, unreadable or unparsable snapshots start an empty collection.
    pub fn load(storage: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let tasks = match storage.read_slot(&slot) {
            Ok(Some(content)) => match decode(&content) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!("Discarding unparsable snapshot in slot {}: {}", slot, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read slot {}, starting empty: {}", slot, e);
                Vec::new()
            }
        };

        let (tasks, ids) = normalize(tasks);
        info!("Loaded {} tasks from slot {}", tasks.len(), slot);

        Self {
            tasks,
            ids,
            storage,
            slot,
        }
    }

    /// Create a task stamped with the current time
    pub fn add(
        &mut self,
        text: &str,
        category: Option<CategoryId>,
        deadline: Option<NaiveDate>,
    ) -> Result<Task> {
        self.add_at(text, category, deadline, Utc::now())
    }

    /// Create a task stamped with `now`.
    ///
    /// The text is trimmed and must not be empty; the category must exist in
    /// the registry. On error the collection is left untouched.
    pub fn add_at(
        &mut self,
        text: &str,
        category: Option<CategoryId>,
        deadline: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyTaskText);
        }
        if let Some(id) = category {
            if category::find(id).is_none() {
                return Err(Error::UnknownCategory(id.0));
            }
        }

        let tasks = &self.tasks;
        let id = self.ids.next_id(now, |id| tasks.iter().any(|t| t.id() == id));
        let task = Task::new(id, text, now, category, deadline);
        self.tasks.push(task.clone());
        debug!("Added task {}", task.id());

        self.persist();
        Ok(task)
    }

    /// Replace a task's text as given.
    ///
    /// Unlike [`TaskStore::add`] the text is neither trimmed nor checked for
    /// emptiness, so an edit can leave a task with empty text.
    pub fn edit_text(&mut self, id: TaskId, new_text: impl Into<String>) -> Result<()> {
        let task = self.find_mut(id)?;
        task.set_text(new_text.into());
        debug!("Edited task {}", id);

        self.persist();
        Ok(())
    }

    /// Flip a task's completion state
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<()> {
        let task = self.find_mut(id)?;
        task.toggle();
        debug!("Task {} completed={}", id, task.is_completed());

        self.persist();
        Ok(())
    }

    /// Remove a task, keeping the order of the rest
    pub fn delete(&mut self, id: TaskId) -> Result<Task> {
        let index = self.position(id)?;
        let task = self.tasks.remove(index);
        debug!("Deleted task {}", id);

        self.persist();
        Ok(task)
    }

    /// All tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Tasks passing `view`, in collection order
    pub fn visible(&self, view: &ViewFilter) -> Vec<&Task> {
        filter::visible_tasks(&self.tasks, &view.search_term, view.category)
    }

    /// Aggregates over the whole collection at `now`
    pub fn statistics(&self, now: DateTime<Utc>) -> Statistics {
        Statistics::compute(&self.tasks, now)
    }

    fn position(&self, id: TaskId) -> Result<usize> {
        self.tasks.iter().position(|t| t.id() == id).ok_or_else(|| {
            warn!("No task with id {}", id);
            Error::TaskNotFound(id)
        })
    }

    fn find_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        let index = self.position(id)?;
        Ok(&mut self.tasks[index])
    }

    /// Write the whole collection to the slot, logging failures
    fn persist(&self) {
        let written = encode(&self.tasks)
            .and_then(|content| self.storage.write_slot(&self.slot, &content));

        match written {
            Ok(()) => debug!("Persisted {} tasks to slot {}", self.tasks.len(), self.slot),
            Err(e) => warn!("Failed to persist slot {}: {}", self.slot, e),
        }
    }
}

fn encode(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string(tasks)?)
}

fn decode(content: &str) -> Result<Vec<Task>> {
    Ok(serde_json::from_str(content)?)
}

/// Restore the collection invariants on loaded data: categories must exist in
/// the registry and ids must be unique.
fn normalize(mut tasks: Vec<Task>) -> (Vec<Task>, IdGenerator) {
    for task in &mut tasks {
        if let Some(id) = task.category() {
            if category::find(id).is_none() {
                warn!("Task {} references unknown category {}, dropping it", task.id(), id);
                task.clear_category();
            }
        }
    }

    let mut ids = IdGenerator::seeded(tasks.iter().map(|t| t.id()));
    let mut taken: HashSet<TaskId> = tasks.iter().map(|t| t.id()).collect();
    let mut seen = HashSet::new();
    for task in &mut tasks {
        if !seen.insert(task.id()) {
            let fresh = ids.next_id(task.created_at(), |id| taken.contains(&id));
            warn!("Duplicate task id {}, reassigned to {}", task.id(), fresh);
            task.reassign_id(fresh);
            taken.insert(fresh);
            seen.insert(fresh);
        }
    }

    (tasks, ids)
}
