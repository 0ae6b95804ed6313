//! # taskapi - Task tracking backend
//!
//! Stores task records in SQLite, enforces their lifecycle rules, and serves
//! them over a JSON HTTP API and a command-line interface.
//!
//! ## Features
//!
//! - **Task Service** - create, read, update and delete with one-time completion stamping
//! - **Statistics** - per-status and per-priority counts over all tasks
//! - **Pluggable Storage** - SQLite for persistence, an in-memory map for tests
//! - **Layered Config** - `~/.taskapi/taskapi.toml`, `./.taskapi/taskapi.toml`, `TASKAPI_*`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskapi::{InMemoryTaskStore, NewTask, TaskPriority, TaskService};
//!
//! # async fn example() -> taskapi::Result<()> {
//! let service = TaskService::new(Arc::new(InMemoryTaskStore::new()));
//!
//! let task = service
//!     .create_task(NewTask::new("Write docs").with_priority(TaskPriority::High))
//!     .await?;
//!
//! let stats = service.compute_statistics().await?;
//! assert_eq!(stats.total_tasks, 1);
//! # let _ = task;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod health;
pub mod init;
pub mod logging;
pub mod models;
pub mod seed;
pub mod server;
pub mod services;
pub mod store;

mod error;

// Error types
pub use error::{Result, TaskApiError};

pub use app::AppContext;
pub use config::{load_config, ConfigLoader, TaskApiConfig};
pub use db::Database;
pub use health::{ComponentHealth, HealthChecker, HealthReport, HealthStatus};
pub use models::{NewTask, TaskChanges, TaskPriority, TaskRecord, TaskStatistics, TaskStatus};
pub use services::TaskService;
pub use store::{InMemoryTaskStore, SqliteTaskStore, TaskStore};
