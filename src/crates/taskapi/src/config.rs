//! Configuration management for taskapi
//!
//! Supports dual-location configuration:
//! - User-level: ~/.taskapi/taskapi.toml
//! - Project-level: ./.taskapi/taskapi.toml
//!
//! Project-level config overrides user-level config, and `TASKAPI_DATABASE_PATH`,
//! `TASKAPI_HOST` and `TASKAPI_PORT` override both.

mod loader;
mod schema;

pub use loader::ConfigLoader;
pub use schema::{DatabaseConfig, LoggingConfig, ServerConfig, TaskApiConfig};

use crate::Result;
use std::path::PathBuf;

/// Directory holding user-level state (`~/.taskapi`)
pub fn taskapi_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskapi")
}

/// Load configuration from every location with the standard precedence
pub async fn load_config() -> Result<TaskApiConfig> {
    ConfigLoader::new().load().await
}
