//! Health check functionality
//!
//! Verifies the database, the task store and the loaded configuration.

use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::TaskApiConfig;
use crate::db::Database;
use crate::store::TaskStore;

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All checks passed
    Healthy,
    /// Some checks failed but system is partially operational
    Degraded,
    /// Critical checks failed, system is not operational
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Degraded => write!(f, "degraded"),
            Self::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Individual component check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Healthy,
            message: Some("OK".to_string()),
            response_time_ms,
        }
    }

    pub fn degraded(name: impl Into<String>, message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            response_time_ms,
        }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms,
        }
    }
}

/// Overall system health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub checks: Vec<ComponentHealth>,
    pub total_response_time_ms: u64,
    /// Unix seconds
    pub timestamp: i64,
}

impl HealthReport {
    /// Worst component status wins
    pub fn new(checks: Vec<ComponentHealth>) -> Self {
        let status = if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        let total_response_time_ms = checks.iter().map(|c| c.response_time_ms).sum();

        Self {
            status,
            checks,
            total_response_time_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn is_unhealthy(&self) -> bool {
        self.status == HealthStatus::Unhealthy
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Health checker for system components
pub struct HealthChecker;

impl HealthChecker {
    /// `SELECT 1` against the pool
    pub async fn check_database(db: &Database) -> ComponentHealth {
        let start = Instant::now();

        match db.health_check().await {
            Ok(()) => ComponentHealth::healthy("database", elapsed_ms(start)),
            Err(e) => ComponentHealth::unhealthy("database", e.to_string(), elapsed_ms(start)),
        }
    }

    /// A full scan through the store succeeds
    pub async fn check_store(store: &dyn TaskStore) -> ComponentHealth {
        let start = Instant::now();

        match store.get_all().await {
            Ok(tasks) => ComponentHealth {
                message: Some(format!("{} backend, {} tasks", store.backend_name(), tasks.len())),
                ..ComponentHealth::healthy("store", elapsed_ms(start))
            },
            Err(e) => ComponentHealth::unhealthy("store", e.to_string(), elapsed_ms(start)),
        }
    }

    /// Configuration problems degrade rather than fail
    pub fn check_config(config: &TaskApiConfig) -> ComponentHealth {
        let start = Instant::now();
        let mut issues = Vec::new();

        if config.server.port == 0 {
            issues.push("server.port is 0");
        }
        if config.database.path.trim().is_empty() {
            issues.push("database.path is empty");
        }

        if issues.is_empty() {
            ComponentHealth::healthy("config", elapsed_ms(start))
        } else {
            ComponentHealth::degraded("config", issues.join("; "), elapsed_ms(start))
        }
    }

    /// Run every check. `db` is absent for in-memory stores.
    pub async fn check_all(
        db: Option<&Database>,
        store: &dyn TaskStore,
        config: &TaskApiConfig,
    ) -> HealthReport {
        let mut checks = Vec::new();

        if let Some(db) = db {
            checks.push(Self::check_database(db).await);
        }
        checks.push(Self::check_store(store).await);
        checks.push(Self::check_config(config));

        HealthReport::new(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryTaskStore, SqliteTaskStore};
    use std::sync::Arc;

    #[test]
    fn test_health_status_display() {
        assert_eq!(HealthStatus::Healthy.to_string(), "healthy");
        assert_eq!(HealthStatus::Degraded.to_string(), "degraded");
        assert_eq!(HealthStatus::Unhealthy.to_string(), "unhealthy");
    }

    #[test]
    fn test_report_takes_worst_status() {
        let report = HealthReport::new(vec![
            ComponentHealth::healthy("database", 10),
            ComponentHealth::degraded("config", "warning", 5),
        ]);
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(report.total_response_time_ms, 15);

        let report = HealthReport::new(vec![
            ComponentHealth::degraded("config", "warning", 5),
            ComponentHealth::unhealthy("store", "error", 10),
        ]);
        assert!(report.is_unhealthy());
    }

    #[test]
    fn test_config_check_degrades_on_bad_values() {
        let mut config = TaskApiConfig::default();
        assert_eq!(HealthChecker::check_config(&config).status, HealthStatus::Healthy);

        config.server.port = 0;
        let check = HealthChecker::check_config(&config);
        assert_eq!(check.status, HealthStatus::Degraded);
        assert_eq!(check.message.as_deref(), Some("server.port is 0"));
    }

    #[tokio::test]
    async fn test_check_all_with_sqlite() {
        let db = Arc::new(Database::initialize_in_memory().await.unwrap());
        let store = SqliteTaskStore::new(db.clone());

        let report = HealthChecker::check_all(Some(db.as_ref()), &store, &TaskApiConfig::default()).await;
        assert_eq!(report.status, HealthStatus::Healthy);
        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["database", "store", "config"]);
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Arc::new(Database::initialize_in_memory().await.unwrap());
        let store = SqliteTaskStore::new(db.clone());
        db.close().await;

        let report = HealthChecker::check_all(Some(db.as_ref()), &store, &TaskApiConfig::default()).await;
        assert!(report.is_unhealthy());
    }

    #[tokio::test]
    async fn test_memory_store_skips_database_check() {
        let store = InMemoryTaskStore::new();
        let report = HealthChecker::check_all(None, &store, &TaskApiConfig::default()).await;
        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.checks.len(), 2);
        assert_eq!(
            report.checks[0].message.as_deref(),
            Some("memory backend, 0 tasks")
        );
    }
}
