//! Sample tasks for fresh installations

use chrono::Duration;
use tracing::info;

use crate::error::Result;
use crate::models::{now, TaskPriority, TaskRecord, TaskStatus};
use crate::store::TaskStore;

/// The three sample tasks, timestamped relative to now
pub fn sample_tasks() -> Vec<TaskRecord> {
    let now = now();

    let mut setup = TaskRecord::new("Setup development environment")
        .with_description("Install the toolchain and an editor, then configure Git")
        .with_priority(TaskPriority::High);
    setup.status = TaskStatus::Completed;
    setup.created_at = now - Duration::days(5);
    setup.completed_at = Some(now - Duration::days(4));

    let mut auth = TaskRecord::new("Implement authentication")
        .with_description("Add token-based authentication to the API")
        .with_priority(TaskPriority::Critical);
    auth.status = TaskStatus::InProgress;
    auth.created_at = now - Duration::days(2);

    let mut tests = TaskRecord::new("Write unit tests")
        .with_description("Cover every handler and service operation")
        .with_priority(TaskPriority::High);
    tests.created_at = now - Duration::days(1);

    vec![setup, auth, tests]
}

/// Insert the sample tasks when the store holds no tasks.
///
/// Returns how many tasks were inserted.
pub async fn seed_if_empty(store: &dyn TaskStore) -> Result<usize> {
    if !store.get_all().await?.is_empty() {
        return Ok(0);
    }

    let tasks = sample_tasks();
    for task in &tasks {
        store.insert(task).await?;
    }

    info!(count = tasks.len(), backend = store.backend_name(), "Seeded sample tasks");
    Ok(tasks.len())
}
