//! Common test utilities and setup

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use taskapi::api::{create_router, AppState};
use taskapi::{Database, InMemoryTaskStore, SqliteTaskStore, TaskApiConfig, TaskService};
use tempfile::TempDir;

static TEST_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Create a migrated file database with a unique name
pub async fn setup_test_db() -> (TempDir, Arc<Database>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let counter = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let db_path = temp_dir.path().join(format!("test_{}.db", counter));

    let db = Database::initialize(&db_path)
        .await
        .expect("Failed to create test database");

    (temp_dir, Arc::new(db))
}

/// Task service over a SQLite file database
pub async fn sqlite_service() -> (TempDir, Arc<Database>, TaskService) {
    let (dir, db) = setup_test_db().await;
    let service = TaskService::new(Arc::new(SqliteTaskStore::new(db.clone())));
    (dir, db, service)
}

/// Task service over an in-memory store
pub fn memory_service() -> TaskService {
    TaskService::new(Arc::new(InMemoryTaskStore::new()))
}

/// Router backed by SQLite, with the database handle for health checks
pub async fn sqlite_router() -> (TempDir, Arc<Database>, axum::Router) {
    let (dir, db, service) = sqlite_service().await;
    let state = AppState::new(service, Some(db.clone()), TaskApiConfig::default());
    (dir, db, create_router(state))
}

/// Router backed by an in-memory store
pub fn memory_router() -> axum::Router {
    let state = AppState::new(memory_service(), None, TaskApiConfig::default());
    create_router(state)
}
