//! In-memory task storage

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::TaskStore;
use crate::error::{Result, TaskApiError};
use crate::models::TaskRecord;

type TaskMap = Arc<RwLock<HashMap<Uuid, TaskRecord>>>;

/// Task store held in a locked `HashMap`; contents are lost on drop
#[derive(Debug, Clone)]
pub struct InMemoryTaskStore {
    tasks: TaskMap,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Drop every record
    pub async fn clear(&self) {
        self.tasks.write().await.clear();
    }
}

impl Default for InMemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, record: &TaskRecord) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&record.id) {
            return Err(TaskApiError::Store(format!(
                "Task {} already exists",
                record.id
            )));
        }
        tasks.insert(record.id, record.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskRecord>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<TaskRecord>> {
        let mut records: Vec<TaskRecord> = self.tasks.read().await.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    async fn replace(&self, record: &TaskRecord) -> Result<bool> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&record.id) {
            Some(stored) => {
                let created_at = stored.created_at;
                *stored = record.clone();
                stored.created_at = created_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
