//! First-time setup: user config, database schema, optional sample data

use std::path::PathBuf;
use tracing::info;

use crate::app::AppContext;
use crate::config::ConfigLoader;
use crate::error::Result;

/// What `initialize` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub config_path: PathBuf,
    /// False when a config file was already present
    pub config_written: bool,
    pub database_path: PathBuf,
    pub seeded: usize,
}

/// Write the default user config if missing, create and migrate the
/// database, and insert the sample tasks into an empty store when `seed`.
pub async fn initialize(loader: &ConfigLoader, seed: bool) -> Result<InitReport> {
    let config_written = loader.write_default_user_config().await?;
    let config = loader.load().await?;
    let database_path = config.database_path();

    let ctx = AppContext::open(config).await?;
    let seeded = if seed { ctx.seed_if_empty().await? } else { 0 };
    ctx.close().await;

    info!(
        database = %database_path.display(),
        config_written,
        seeded,
        "Initialization complete"
    );

    Ok(InitReport {
        config_path: loader.user_config_path().to_path_buf(),
        config_written,
        database_path,
        seeded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("data").join("tasks.db");
        let project = dir.path().join("project.toml");
        fs::write(
            &project,
            format!("[database]\npath = {:?}\n", db_path.to_string_lossy()),
        )
        .await
        .unwrap();

        let loader = ConfigLoader::with_paths(dir.path().join("home").join("taskapi.toml"), project);

        let first = initialize(&loader, true).await.unwrap();
        assert!(first.config_written);
        assert_eq!(first.seeded, 3);
        assert_eq!(first.database_path, db_path);
        assert!(db_path.exists());

        let second = initialize(&loader, true).await.unwrap();
        assert!(!second.config_written);
        assert_eq!(second.seeded, 0);
    }
}
