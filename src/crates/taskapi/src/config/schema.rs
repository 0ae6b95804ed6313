//! Configuration schema for taskapi

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, TaskApiError};

/// Main taskapi configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TaskApiConfig {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path (relative to ~/.taskapi or absolute)
    pub path: String,

    /// Connection pool size
    pub max_connections: u32,

    /// Insert the sample tasks at server start when the store is empty
    pub seed_sample_data: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "tasks.db".to_string(),
            max_connections: 5,
            seed_sample_data: false,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// Log format: "compact", "pretty", "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl TaskApiConfig {
    /// Resolve environment variables in configuration values
    ///
    /// Supports ${VAR_NAME} syntax in string fields
    pub fn resolve_env_vars(&mut self) {
        self.database.path = Self::expand_env_var(&self.database.path);
        self.server.host = Self::expand_env_var(&self.server.host);
    }

    fn expand_env_var(value: &str) -> String {
        if value.starts_with("${") && value.ends_with('}') {
            let var_name = &value[2..value.len() - 1];
            std::env::var(var_name).unwrap_or_else(|_| value.to_string())
        } else {
            value.to_string()
        }
    }

    /// Apply `TASKAPI_*` overrides, reading variables through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TASKAPI_DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(host) = lookup("TASKAPI_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("TASKAPI_PORT") {
            self.server.port = port.trim().parse().map_err(|_| {
                TaskApiError::Config(format!("TASKAPI_PORT is not a valid port: {}", port))
            })?;
        }
        Ok(())
    }

    /// Get the resolved database path
    ///
    /// If path is relative, resolves it relative to ~/.taskapi
    pub fn database_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.database.path);

        if path.is_absolute() {
            path
        } else {
            super::taskapi_home().join(path)
        }
    }

    /// Reject values that cannot work at runtime
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(TaskApiError::Config("database.path must not be empty".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(TaskApiError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.server.port == 0 {
            return Err(TaskApiError::Config("server.port must not be 0".to_string()));
        }
        match self.logging.format.as_str() {
            "compact" | "pretty" | "json" => Ok(()),
            other => Err(TaskApiError::Config(format!(
                "logging.format must be compact, pretty or json, got '{}'",
                other
            ))),
        }
    }
}
