//! Task service: domain rules over a [`TaskStore`]

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{now, NewTask, TaskRecord, TaskStatistics, TaskStatus};
use crate::store::TaskStore;

/// Creates, updates and aggregates task records
///
/// Missing records are reported as `None` or `false`, never as errors.
/// Store failures propagate unchanged.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    /// Create a new task service
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Backing store
    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }

    /// Create a pending task with a fresh identifier
    pub async fn create_task(&self, input: NewTask) -> Result<TaskRecord> {
        input.validate()?;

        let record = input.into_record();
        self.store.insert(&record).await?;

        info!(
            task_id = %record.id,
            priority = %record.priority,
            "Task created"
        );
        Ok(record)
    }

    pub async fn get_task(&self, id: Uuid) -> Result<Option<TaskRecord>> {
        debug!(task_id = %id, "Fetching task");
        self.store.get_by_id(id).await
    }

    /// All tasks, newest first
    pub async fn list_tasks(&self) -> Result<Vec<TaskRecord>> {
        let tasks = self.store.get_all().await?;
        debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Persist `record` as the new state of an existing task.
    ///
    /// `record` is the desired final state, usually a fetched record with some
    /// fields changed. The stored `created_at` always wins. `completed_at` is
    /// stamped the first time the task is saved as `Completed` and kept from
    /// then on, whatever the status becomes. `updated_at` is set to now.
    ///
    /// Returns `None` when no task has `record.id`.
    pub async fn update_task(&self, record: TaskRecord) -> Result<Option<TaskRecord>> {
        record.validate()?;

        let Some(existing) = self.store.get_by_id(record.id).await? else {
            debug!(task_id = %record.id, "Update skipped, task not found");
            return Ok(None);
        };

        let timestamp = now();
        let mut updated = record;
        updated.created_at = existing.created_at;
        updated.completed_at = match existing.completed_at {
            Some(completed_at) => Some(completed_at),
            None if updated.status == TaskStatus::Completed => Some(timestamp),
            None => None,
        };
        updated.updated_at = Some(timestamp);

        if !self.store.replace(&updated).await? {
            warn!(task_id = %updated.id, "Task removed before update was written");
            return Ok(None);
        }

        info!(
            task_id = %updated.id,
            status = %updated.status,
            "Task updated"
        );
        Ok(Some(updated))
    }

    /// Delete a task, returning whether it existed
    pub async fn delete_task(&self, id: Uuid) -> Result<bool> {
        let deleted = self.store.delete_by_id(id).await?;
        if deleted {
            info!(task_id = %id, "Task deleted");
        } else {
            debug!(task_id = %id, "Delete skipped, task not found");
        }
        Ok(deleted)
    }

    /// Counts over a snapshot of every stored task
    pub async fn compute_statistics(&self) -> Result<TaskStatistics> {
        let tasks = self.store.get_all().await?;
        let stats = TaskStatistics::from_records(&tasks);
        debug!(total = stats.total_tasks, "Computed task statistics");
        Ok(stats)
    }
}

impl fmt::Debug for TaskService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskService")
            .field("store", &self.store.backend_name())
            .finish()
    }
}
