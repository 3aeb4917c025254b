//! Task model definitions

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::TaskId;
use crate::category::CategoryId;

/// A to-do item
///
/// Fields are read through accessors: `id` and `created_at` never change once
/// the task exists, and the category always references a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: String,
    #[serde(default)]
    completed: bool,
    created_at: DateTime<Utc>,
    #[serde(default, with = "category_record")]
    category: Option<CategoryId>,
    #[serde(default)]
    deadline: Option<NaiveDate>,
}

impl Task {
    pub(crate) fn new(
        id: TaskId,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
        category: Option<CategoryId>,
        deadline: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            created_at,
            category,
            deadline,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Whether the deadline has started before `now`, regardless of completion.
    ///
    /// A date-only deadline is taken to begin at midnight UTC.
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        self.deadline
            .map(|date| date.and_time(NaiveTime::MIN).and_utc() < now)
            .unwrap_or(false)
    }

    /// An incomplete task whose deadline is already behind `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.is_past_deadline(now)
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub(crate) fn reassign_id(&mut self, id: TaskId) {
        self.id = id;
    }

    /// Drops a category reference that the registry does not know
    pub(crate) fn clear_category(&mut self) {
        self.category = None;
    }
}

/// Persisted shape of the task category: the registry entry is written out in
/// full, but only its id is read back.
mod category_record {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::category::{self, CategoryId};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Written<'a> {
        id: CategoryId,
        name: &'a str,
        display_color: &'a str,
    }

    #[derive(Deserialize)]
    struct Read {
        id: CategoryId,
    }

    pub fn serialize<S>(value: &Option<CategoryId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match (*value).and_then(category::find) {
            Some(cat) => Written {
                id: cat.id,
                name: cat.name,
                display_color: cat.display_color,
            }
            .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<CategoryId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Read>::deserialize(deserializer)?.map(|r| r.id))
    }
}
