//! View filter
//!
//! Derives the visible tasks from the full collection. Nothing here is cached:
//! callers recompute the view whenever the collection or the controls change.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::category::CategoryId;
use crate::task::Task;
use crate::Error;

/// Category selection in the filter controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryId),
}

impl CategoryFilter {
    /// Sentinel used by the controls for "no category restriction"
    pub const ALL: &'static str = "all";

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => task.category() == Some(id),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == Self::ALL {
            return Ok(Self::All);
        }
        s.parse::<u32>()
            .map(|id| Self::Category(CategoryId(id)))
            .map_err(|_| Error::InvalidInput(format!("Invalid category filter: {:?}", s)))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(Self::ALL),
            Self::Category(id) => write!(f, "{}", id),
        }
    }
}

/// Active search term and category selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewFilter {
    pub search_term: String,
    pub category: CategoryFilter,
}

impl ViewFilter {
    pub fn new(search_term: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search_term: search_term.into(),
            category,
        }
    }

    /// Whether any control restricts the view
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || self.category != CategoryFilter::All
    }

    pub fn apply<'a>(&self, all: &'a [Task]) -> Vec<&'a Task> {
        visible_tasks(all, &self.search_term, self.category)
    }
}

/// Tasks whose text contains `search_term` (ignoring case) and whose category
/// passes `category`, in collection order.
pub fn visible_tasks<'a>(
    all: &'a [Task],
    search_term: &str,
    category: CategoryFilter,
) -> Vec<&'a Task> {
    let needle = search_term.to_lowercase();
    all.iter()
        .filter(|task| task.text().to_lowercase().contains(&needle))
        .filter(|task| category.matches(task))
        .collect()
}
