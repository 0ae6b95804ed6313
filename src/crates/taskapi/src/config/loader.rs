//! Configuration loader with dual-location support
//!
//! Loads configuration from:
//! 1. Default values
//! 2. User-level config: ~/.taskapi/taskapi.toml
//! 3. Project-level config: ./.taskapi/taskapi.toml
//! 4. `TASKAPI_*` environment variables
//!
//! Later sources override earlier ones.

use crate::config::schema::TaskApiConfig;
use crate::error::{Result, TaskApiError};
use std::path::{Path, PathBuf};
use tokio::fs;
use toml::{Table, Value};
use tracing::{debug, info};

const CONFIG_FILE: &str = "taskapi.toml";

/// Configuration loader that handles both user and project configs
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    user_config_path: PathBuf,
    project_config_path: PathBuf,
    read_env: bool,
}

impl ConfigLoader {
    /// Loader over the standard locations
    pub fn new() -> Self {
        let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            user_config_path: super::taskapi_home().join(CONFIG_FILE),
            project_config_path: project_root.join(".taskapi").join(CONFIG_FILE),
            read_env: true,
        }
    }

    /// Loader over explicit files, ignoring `TASKAPI_*` variables
    pub fn with_paths(user_config_path: impl Into<PathBuf>, project_config_path: impl Into<PathBuf>) -> Self {
        Self {
            user_config_path: user_config_path.into(),
            project_config_path: project_config_path.into(),
            read_env: false,
        }
    }

    /// Load configuration from every source in priority order
    ///
    /// Missing files are skipped; unreadable or malformed files are errors.
    pub async fn load(&self) -> Result<TaskApiConfig> {
        debug!("Loading configuration with defaults");
        let mut layered = Table::new();

        for (scope, path) in [
            ("user", &self.user_config_path),
            ("project", &self.project_config_path),
        ] {
            match self.load_from_path(path).await? {
                Some(table) => {
                    debug!(scope, path = %path.display(), "Loaded config file");
                    merge_tables(&mut layered, table);
                }
                None => debug!(scope, path = %path.display(), "Config file not found"),
            }
        }

        let mut config: TaskApiConfig = Value::Table(layered)
            .try_into()
            .map_err(|e| TaskApiError::Config(format!("Invalid configuration: {}", e)))?;
        config.resolve_env_vars();

        if self.read_env {
            config.apply_overrides(|key| std::env::var(key).ok())?;
        }

        config.validate()?;

        info!(database = %config.database_path().display(), "Configuration loaded");
        Ok(config)
    }

    async fn load_from_path(&self, path: &Path) -> Result<Option<Table>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            TaskApiError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let table: Table = content.parse().map_err(|e| {
            TaskApiError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(Some(table))
    }

    /// Write the default config to the user location unless a file is already there.
    ///
    /// Returns whether a file was written.
    pub async fn write_default_user_config(&self) -> Result<bool> {
        if self.user_config_path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.user_config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(&TaskApiConfig::default())
            .map_err(|e| TaskApiError::Config(format!("Failed to render config: {}", e)))?;
        fs::write(&self.user_config_path, content).await?;

        info!(path = %self.user_config_path.display(), "Wrote default configuration");
        Ok(true)
    }

    pub fn user_config_path(&self) -> &Path {
        &self.user_config_path
    }

    pub fn project_config_path(&self) -> &Path {
        &self.project_config_path
    }
}

/// Overlay `overlay` onto `base` key by key; nested tables merge recursively
fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
