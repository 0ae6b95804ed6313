//! Aggregate task counts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::task::{TaskPriority, TaskRecord, TaskStatus};

/// Counts derived from a full scan of the store
///
/// `tasks_by_priority` only holds priorities that occur at least once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    pub total_tasks: usize,
    pub pending_tasks: usize,
    pub in_progress_tasks: usize,
    pub completed_tasks: usize,
    pub cancelled_tasks: usize,
    pub tasks_by_priority: BTreeMap<TaskPriority, usize>,
}

impl TaskStatistics {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a TaskRecord>,
    {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.total_tasks += 1;
            match record.status {
                TaskStatus::Pending => stats.pending_tasks += 1,
                TaskStatus::InProgress => stats.in_progress_tasks += 1,
                TaskStatus::Completed => stats.completed_tasks += 1,
                TaskStatus::Cancelled => stats.cancelled_tasks += 1,
            }
            *stats.tasks_by_priority.entry(record.priority).or_insert(0) += 1;
            stats
        })
    }

    /// Count for one priority, zero when absent from the map
    pub fn priority_count(&self, priority: TaskPriority) -> usize {
        self.tasks_by_priority.get(&priority).copied().unwrap_or(0)
    }

    /// Sum of the four per-status counters
    pub fn status_sum(&self) -> usize {
        self.pending_tasks + self.in_progress_tasks + self.completed_tasks + self.cancelled_tasks
    }
}
