//! Task persistence
//!
//! [`TaskStore`] is plain keyed storage with no business rules. A missing
//! record is a normal result (`None` / `false`); only persistence faults
//! come back as [`TaskApiError::Store`](crate::TaskApiError::Store).
//!
//! Two backends ship with the crate:
//!
//! - [`SqliteTaskStore`] - durable, backed by the embedded SQLite schema
//! - [`InMemoryTaskStore`] - a locked `HashMap`, for tests and throwaway servers

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::TaskRecord;

pub use memory::InMemoryTaskStore;
pub use sqlite::SqliteTaskStore;

/// Durable keyed storage for task records
///
/// Implementations must be safe to share between concurrent callers; each
/// operation is atomic for a single record.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Store a new record. Fails if the identifier is already present.
    async fn insert(&self, record: &TaskRecord) -> Result<()>;

    /// Look up a record by identifier
    async fn get_by_id(&self, id: Uuid) -> Result<Option<TaskRecord>>;

    /// All records, newest `created_at` first
    async fn get_all(&self) -> Result<Vec<TaskRecord>>;

    /// Overwrite the stored record with the same identifier.
    ///
    /// Returns `false` when no such record exists. `created_at` is part of
    /// the identity of a record and is left as stored.
    async fn replace(&self, record: &TaskRecord) -> Result<bool>;

    /// Remove a record, returning whether one was removed
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;

    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;
}
