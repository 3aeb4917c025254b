//! Statistics aggregator
//!
//! Counts are always taken over the whole collection, never the filtered view.
//! Overdue depends on the evaluation time, so results must not be reused
//! across renders.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::category::{self, Category};
use crate::task::Task;

/// Per-category totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    #[serde(serialize_with = "serialize_category")]
    pub category: &'static Category,
    pub total: usize,
    pub completed: usize,
}

impl CategoryStats {
    pub fn name(&self) -> &'static str {
        self.category.name
    }

    pub fn color(&self) -> &'static str {
        self.category.chart_color
    }
}

/// Aggregates over the full task collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Whole percent in `0..=100`
    pub completion_rate: u8,
    pub overdue_count: usize,
    /// One entry per registry category, in registry order
    pub categories: Vec<CategoryStats>,
}

impl Statistics {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.is_completed()).count();
        let overdue_count = tasks.iter().filter(|t| t.is_overdue(now)).count();

        let categories = category::all()
            .iter()
            .map(|cat| {
                let in_category = tasks.iter().filter(|t| t.category() == Some(cat.id));
                let (total, completed) = in_category.fold((0, 0), |(total, completed), t| {
                    (total + 1, completed + usize::from(t.is_completed()))
                });
                CategoryStats {
                    category: cat,
                    total,
                    completed,
                }
            })
            .collect();

        Self {
            total_tasks,
            completed_tasks,
            completion_rate: completion_rate(completed_tasks, total_tasks),
            overdue_count,
            categories,
        }
    }

    /// Statistics as of the current instant
    pub fn now(tasks: &[Task]) -> Self {
        Self::compute(tasks, Utc::now())
    }

    /// Categories that have at least one task, for the pie and bar charts
    pub fn chart_data(&self) -> Vec<&CategoryStats> {
        self.categories.iter().filter(|c| c.total > 0).collect()
    }

    pub fn category(&self, name: &str) -> Option<&CategoryStats> {
        self.categories.iter().find(|c| c.category.name == name)
    }
}

/// `completed / total` as a whole percent, rounding halves up
fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let (completed, total) = (completed as u64, total as u64);
    let rate = (200 * completed + total) / (2 * total);
    u8::try_from(rate.min(100)).unwrap_or(100)
}

fn serialize_category<S>(category: &&'static Category, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeStruct;

    let mut state = serializer.serialize_struct("Category", 3)?;
    state.serialize_field("id", &category.id)?;
    state.serialize_field("name", category.name)?;
    state.serialize_field("color", category.chart_color)?;
    state.end()
}
