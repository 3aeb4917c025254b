//! Task identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identifier: the creation time in milliseconds, bumped when needed to
/// stay unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out unique task ids.
///
/// Ids increase strictly while there is room above the largest one seen: two
/// tasks created within the same millisecond still get distinct ids, and a
/// clock that steps backwards never produces an id that was already issued.
/// Once `u64::MAX` has been issued, the smallest id not in use is returned.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from existing ids so freshly issued ids never collide with them
    pub fn seeded(existing: impl IntoIterator<Item = TaskId>) -> Self {
        let last = existing.into_iter().map(|id| id.0).max().unwrap_or(0);
        Self { last }
    }

    /// Issue the next id for a task created at `now`.
    ///
    /// `is_taken` reports ids already present in the collection; it is only
    /// consulted once the increasing range is exhausted.
    pub fn next_id(&mut self, now: DateTime<Utc>, is_taken: impl Fn(TaskId) -> bool) -> TaskId {
        match self.last.checked_add(1) {
            Some(after_last) => {
                let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
                let id = millis.max(after_last);
                self.last = id;
                TaskId(id)
            }
            None => smallest_free(is_taken),
        }
    }
}

/// Lowest id rejected by `is_taken`. A collection never holds every `u64`, so
/// the scan ends within `len + 1` steps.
fn smallest_free(is_taken: impl Fn(TaskId) -> bool) -> TaskId {
    let mut candidate = 0u64;
    while is_taken(TaskId(candidate)) && candidate < u64::MAX {
        candidate += 1;
    }
    TaskId(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn test_ids_follow_the_clock() {
        let mut ids = IdGenerator::new();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(ids.next_id(now, |_| false), TaskId(now.timestamp_millis() as u64));
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ids = IdGenerator::new();
        let now = Utc::now();
        let first = ids.next_id(now, |_| false);
        let second = ids.next_id(now, |_| false);
        let third = ids.next_id(now, |_| false);
        assert!(first < second && second < third);
    }

    #[test]
    fn test_ids_survive_clock_going_backwards() {
        let mut ids = IdGenerator::new();
        let later = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let a = ids.next_id(later, |_| false);
        let b = ids.next_id(earlier, |_| false);
        assert!(b > a);
    }

    #[test]
    fn test_seeded_from_existing() {
        let existing = [TaskId(5), TaskId(u64::MAX / 2), TaskId(7)];
        let mut ids = IdGenerator::seeded(existing);
        let next = ids.next_id(Utc::now(), |_| false);
        assert_eq!(next, TaskId(u64::MAX / 2 + 1));
    }

    #[test]
    fn test_exhausted_range_reuses_smallest_free_id() {
        let taken: HashSet<TaskId> = [TaskId(0), TaskId(1), TaskId(3), TaskId(u64::MAX)]
            .into_iter()
            .collect();
        let mut ids = IdGenerator::seeded(taken.iter().copied());

        let first = ids.next_id(Utc::now(), |id| taken.contains(&id));
        assert_eq!(first, TaskId(2));

        let mut taken = taken;
        taken.insert(first);
        let second = ids.next_id(Utc::now(), |id| taken.contains(&id));
        assert_eq!(second, TaskId(4));
    }

    #[test]
    fn test_issuing_max_id_then_falls_back() {
        let mut ids = IdGenerator::seeded([TaskId(u64::MAX - 1)]);
        let max = ids.next_id(Utc::now(), |_| false);
        assert_eq!(max, TaskId(u64::MAX));

        let after = ids.next_id(Utc::now(), |id| id == max);
        assert_eq!(after, TaskId(0));
    }
}
