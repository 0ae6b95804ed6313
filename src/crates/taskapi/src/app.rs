//! Wiring from configuration to a ready task service

use std::sync::Arc;
use tracing::info;

use crate::api::AppState;
use crate::config::TaskApiConfig;
use crate::db::Database;
use crate::error::Result;
use crate::health::{HealthChecker, HealthReport};
use crate::seed;
use crate::services::TaskService;
use crate::store::{InMemoryTaskStore, SqliteTaskStore};

/// Everything a command or the server needs to reach the tasks
#[derive(Clone, Debug)]
pub struct AppContext {
    config: TaskApiConfig,
    database: Option<Arc<Database>>,
    service: TaskService,
}

impl AppContext {
    /// Open the configured SQLite database and bring its schema up to date
    pub async fn open(config: TaskApiConfig) -> Result<Self> {
        let path = config.database_path();
        let db = Database::with_max_connections(&path, config.database.max_connections).await?;
        db.run_migrations().await?;

        let db = Arc::new(db);
        let service = TaskService::new(Arc::new(SqliteTaskStore::new(db.clone())));

        Ok(Self {
            config,
            database: Some(db),
            service,
        })
    }

    /// Service over a fresh in-memory store; nothing outlives the process
    pub fn in_memory(config: TaskApiConfig) -> Self {
        info!("Using in-memory task store");
        Self {
            config,
            database: None,
            service: TaskService::new(Arc::new(InMemoryTaskStore::new())),
        }
    }

    /// Insert the sample tasks if the store is empty
    pub async fn seed_if_empty(&self) -> Result<usize> {
        seed::seed_if_empty(&**self.service.store()).await
    }

    pub fn config(&self) -> &TaskApiConfig {
        &self.config
    }

    pub fn database(&self) -> Option<&Arc<Database>> {
        self.database.as_ref()
    }

    pub fn service(&self) -> &TaskService {
        &self.service
    }

    pub async fn health(&self) -> HealthReport {
        HealthChecker::check_all(
            self.database.as_deref(),
            &**self.service.store(),
            &self.config,
        )
        .await
    }

    /// HTTP state sharing this context's service and database
    pub fn app_state(&self) -> AppState {
        AppState::new(self.service.clone(), self.database.clone(), self.config.clone())
    }

    /// Close the database pool, if any
    pub async fn close(&self) {
        if let Some(db) = &self.database {
            db.close().await;
        }
    }
}
