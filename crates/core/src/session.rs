//! Presentation-facing session
//!
//! Accepts the raw strings coming from input controls, forwards them to the
//! [`TaskStore`], and hands back a [`ViewSnapshot`] for the caller to render.
//! Nothing is pushed to the renderer; it asks for a new snapshot after each
//! event it forwards.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::category::CategoryId;
use crate::config::TodoConfig;
use crate::filter::{CategoryFilter, ViewFilter};
use crate::notice::Notice;
use crate::stats::Statistics;
use crate::storage::{FileSlotStorage, SlotStorage};
use crate::store::TaskStore;
use crate::task::{Task, TaskId};
use crate::{Error, Result};

const EMPTY_TEXT_NOTICE: &str = "Prosím zadaj text úlohy";

/// Why the visible list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The collection itself is empty
    NoTasks,
    /// Tasks exist but the filter hides all of them
    NoMatches,
}

impl EmptyState {
    pub fn label(self) -> &'static str {
        match self {
            Self::NoTasks => "Zatiaľ nemáš žiadne úlohy. Začni pridaním novej úlohy!",
            Self::NoMatches => "Žiadne úlohy nezodpovedajú filtru",
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot<'a> {
    pub visible: Vec<&'a Task>,
    /// `None` while the statistics panel is hidden
    pub statistics: Option<Statistics>,
    pub notice: Option<&'a Notice>,
    pub empty_state: Option<EmptyState>,
    pub editing: Option<TaskId>,
}

#[derive(Debug)]
pub struct TodoSession<S> {
    store: TaskStore<S>,
    filter: ViewFilter,
    editing: Option<TaskId>,
    show_statistics: bool,
    notice: Option<Notice>,
    notice_duration: Duration,
}

impl TodoSession<FileSlotStorage> {
    pub fn from_config(config: &TodoConfig) -> Self {
        Self::new(config.open_store(), config.notice_duration)
    }
}

impl<S: SlotStorage> TodoSession<S> {
    pub fn new(store: TaskStore<S>, notice_duration: Duration) -> Self {
        Self {
            store,
            filter: ViewFilter::default(),
            editing: None,
            show_statistics: true,
            notice: None,
            notice_duration,
        }
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn into_store(self) -> TaskStore<S> {
        self.store
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// Add a task from the raw form inputs.
    ///
    /// `category_input` is a registry id or empty; `deadline_input` is
    /// `YYYY-MM-DD` or empty. A rejected text or category raises a notice.
    pub fn submit(
        &mut self,
        text: &str,
        category_input: &str,
        deadline_input: &str,
        now: DateTime<Utc>,
    ) -> Result<Task> {
        let category = parse_category(category_input)?;
        let deadline = parse_deadline(deadline_input)?;

        match self.store.add_at(text, category, deadline, now) {
            Ok(task) => Ok(task),
            Err(e) if e.is_validation() => {
                let message = match &e {
                    Error::EmptyTaskText => EMPTY_TEXT_NOTICE.to_string(),
                    other => other.to_string(),
                };
                self.notice = Some(Notice::new(message, now, self.notice_duration));
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
    }

    /// Select a category filter from the control value (`"all"` or an id)
    pub fn set_category_filter(&mut self, value: &str) -> Result<()> {
        self.filter.category = value.parse::<CategoryFilter>()?;
        Ok(())
    }

    pub fn begin_edit(&mut self, id: TaskId) -> Result<()> {
        if self.store.get(id).is_none() {
            return Err(Error::TaskNotFound(id));
        }
        self.editing = Some(id);
        Ok(())
    }

    pub fn edit_text(&mut self, id: TaskId, text: impl Into<String>) -> Result<()> {
        self.store.edit_text(id, text)
    }

    pub fn finish_edit(&mut self) {
        self.editing = None;
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<()> {
        self.store.toggle_completed(id)
    }

    pub fn delete(&mut self, id: TaskId) -> Result<Task> {
        let task = self.store.delete(id)?;
        if self.editing == Some(id) {
            self.editing = None;
        }
        Ok(task)
    }

    pub fn toggle_statistics(&mut self) -> bool {
        self.show_statistics = !self.show_statistics;
        self.show_statistics
    }

    /// Drop the notice once its display time has passed
    pub fn dismiss_expired(&mut self, now: DateTime<Utc>) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    /// Derive the current view at `now`
    pub fn snapshot(&self, now: DateTime<Utc>) -> ViewSnapshot<'_> {
        let visible = self.filter.apply(self.store.tasks());
        let empty_state = if !visible.is_empty() {
            None
        } else if self.filter.is_active() {
            Some(EmptyState::NoMatches)
        } else {
            Some(EmptyState::NoTasks)
        };

        ViewSnapshot {
            visible,
            statistics: self.show_statistics.then(|| self.store.statistics(now)),
            notice: self.notice.as_ref().filter(|n| !n.is_expired(now)),
            empty_state,
            editing: self.editing,
        }
    }
}

fn parse_category(input: &str) -> Result<Option<CategoryId>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<u32>()
        .map(|id| Some(CategoryId(id)))
        .map_err(|_| Error::InvalidInput(format!("Invalid category: {:?}", input)))
}

fn parse_deadline(input: &str) -> Result<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| Error::InvalidInput(format!("Invalid deadline {:?}: {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlotStorage;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn session(storage: &MemorySlotStorage) -> TodoSession<&MemorySlotStorage> {
        TodoSession::new(TaskStore::load(storage, "todos"), Duration::seconds(3))
    }

    fn visible_texts(snapshot: &ViewSnapshot<'_>) -> Vec<String> {
        snapshot.visible.iter().map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn test_submit_parses_raw_inputs() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);

        let task = session.submit(" Buy milk ", "3", "2024-06-20", now()).unwrap();
        assert_eq!(task.text(), "Buy milk");
        assert_eq!(task.category(), Some(CategoryId(3)));
        assert_eq!(task.deadline(), NaiveDate::from_ymd_opt(2024, 6, 20));

        let plain = session.submit("Walk dog", "", "", now()).unwrap();
        assert!(plain.category().is_none());
        assert!(plain.deadline().is_none());
    }

    #[test]
    fn test_blank_submit_raises_transient_notice() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);

        let result = session.submit("   ", "", "", now());
        assert!(matches!(result, Err(Error::EmptyTaskText)));
        assert!(session.store().is_empty());

        let shown = session.snapshot(now());
        assert_eq!(shown.notice.unwrap().message, EMPTY_TEXT_NOTICE);

        let later = now() + Duration::seconds(3);
        assert!(session.snapshot(later).notice.is_none());
        session.dismiss_expired(later);
        assert!(session.snapshot(now()).notice.is_none());
    }

    #[test]
    fn test_malformed_inputs_are_rejected() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);

        assert!(matches!(
            session.submit("Task", "shopping", "", now()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            session.submit("Task", "", "20.6.2024", now()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            session.submit("Task", "7", "", now()),
            Err(Error::UnknownCategory(7))
        ));
        assert!(session.store().is_empty());
        assert!(session.snapshot(now()).notice.is_some());
    }

    #[test]
    fn test_empty_states() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);
        assert_eq!(session.snapshot(now()).empty_state, Some(EmptyState::NoTasks));

        session.submit("Walk dog", "2", "", now()).unwrap();
        assert_eq!(session.snapshot(now()).empty_state, None);

        session.set_search_term("milk");
        let snapshot = session.snapshot(now());
        assert!(snapshot.visible.is_empty());
        assert_eq!(snapshot.empty_state, Some(EmptyState::NoMatches));
    }

    #[test]
    fn test_filter_controls() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);
        session.submit("Buy milk", "3", "", now()).unwrap();
        session.submit("Walk dog", "2", "", now()).unwrap();
        session.submit("Buy bread", "", "", now()).unwrap();

        session.set_search_term("BUY");
        assert_eq!(visible_texts(&session.snapshot(now())), vec!["Buy milk", "Buy bread"]);

        session.set_category_filter("3").unwrap();
        assert_eq!(visible_texts(&session.snapshot(now())), vec!["Buy milk"]);

        session.set_category_filter("all").unwrap();
        session.set_search_term("");
        assert_eq!(session.snapshot(now()).visible.len(), 3);

        assert!(session.set_category_filter("nope").is_err());
        assert_eq!(session.filter().category, CategoryFilter::All);
    }

    #[test]
    fn test_statistics_follow_whole_collection() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);
        session.submit("Buy milk", "3", "", now()).unwrap();
        session.submit("Walk dog", "2", "", now()).unwrap();
        session.set_search_term("milk");

        let stats = session.snapshot(now()).statistics.unwrap();
        assert_eq!(stats.total_tasks, 2);

        assert!(!session.toggle_statistics());
        assert!(session.snapshot(now()).statistics.is_none());
        assert!(session.toggle_statistics());
    }

    #[test]
    fn test_edit_flow() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);
        let id = session.submit("Draft", "", "", now()).unwrap().id();

        session.begin_edit(id).unwrap();
        assert_eq!(session.snapshot(now()).editing, Some(id));
        session.edit_text(id, "Final").unwrap();
        session.finish_edit();

        let snapshot = session.snapshot(now());
        assert_eq!(snapshot.editing, None);
        assert_eq!(visible_texts(&snapshot), vec!["Final"]);
        assert!(matches!(session.begin_edit(TaskId(1)), Err(Error::TaskNotFound(_))));
    }

    #[test]
    fn test_delete_ends_edit_of_that_task() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);
        let id = session.submit("Temp", "", "", now()).unwrap().id();

        session.begin_edit(id).unwrap();
        session.delete(id).unwrap();

        assert_eq!(session.snapshot(now()).editing, None);
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_toggle_updates_overdue() {
        let storage = MemorySlotStorage::new();
        let mut session = session(&storage);
        let id = session.submit("Taxes", "1", "2020-01-01", now()).unwrap().id();

        assert_eq!(session.snapshot(now()).statistics.unwrap().overdue_count, 1);
        session.toggle(id).unwrap();
        assert_eq!(session.snapshot(now()).statistics.unwrap().overdue_count, 0);
    }
}
