//! SQLite task storage

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use super::TaskStore;
use crate::db::Database;
use crate::error::{Result, TaskApiError};
use crate::models::{TaskPriority, TaskRecord, TaskStatus};

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, priority, status, created_at, updated_at, completed_at FROM tasks";

/// Task store backed by the `tasks` table
#[derive(Clone, Debug)]
pub struct SqliteTaskStore {
    db: Arc<Database>,
}

impl SqliteTaskStore {
    /// Create a store over an already migrated database
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Underlying database handle
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn insert(&self, record: &TaskRecord) -> Result<()> {
        sqlx::query(
            "INSERT INTO tasks (id, title, description, priority, status, created_at, updated_at, completed_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.priority as i64)
        .bind(record.status as i64)
        .bind(record.created_at.timestamp_micros())
        .bind(record.updated_at.map(|t| t.timestamp_micros()))
        .bind(record.completed_at.map(|t| t.timestamp_micros()))
        .execute(self.db.pool())
        .await
        .map_err(|e| TaskApiError::Store(format!("Failed to insert task: {}", e)))?;

        debug!(task_id = %record.id, "Task row inserted");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskRecord>> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.to_string())
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| TaskApiError::Store(format!("Failed to load task: {}", e)))?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn get_all(&self) -> Result<Vec<TaskRecord>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at DESC, id ASC", SELECT_COLUMNS))
            .fetch_all(self.db.pool())
            .await
            .map_err(|e| TaskApiError::Store(format!("Failed to list tasks: {}", e)))?;

        rows.iter().map(row_to_record).collect()
    }

    async fn replace(&self, record: &TaskRecord) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE tasks
             SET title = ?, description = ?, priority = ?, status = ?, updated_at = ?, completed_at = ?
             WHERE id = ?",
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.priority as i64)
        .bind(record.status as i64)
        .bind(record.updated_at.map(|t| t.timestamp_micros()))
        .bind(record.completed_at.map(|t| t.timestamp_micros()))
        .bind(record.id.to_string())
        .execute(self.db.pool())
        .await
        .map_err(|e| TaskApiError::Store(format!("Failed to update task: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id.to_string())
            .execute(self.db.pool())
            .await
            .map_err(|e| TaskApiError::Store(format!("Failed to delete task: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

fn row_to_record(row: &SqliteRow) -> Result<TaskRecord> {
    let id: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id)
        .map_err(|e| TaskApiError::Store(format!("Invalid stored task id '{}': {}", id, e)))?;

    Ok(TaskRecord {
        id,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        priority: TaskPriority::try_from(row.try_get::<i64, _>("priority")?)?,
        status: TaskStatus::try_from(row.try_get::<i64, _>("status")?)?,
        created_at: from_micros(row.try_get("created_at")?)?,
        updated_at: row
            .try_get::<Option<i64>, _>("updated_at")?
            .map(from_micros)
            .transpose()?,
        completed_at: row
            .try_get::<Option<i64>, _>("completed_at")?
            .map(from_micros)
            .transpose()?,
    })
}

fn from_micros(micros: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| TaskApiError::Store(format!("Invalid stored timestamp: {}", micros)))
}
