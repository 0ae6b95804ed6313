//! CLI command implementations
//!
//! Provides command handlers for the taskapi binary.

pub mod task;

use colored::Colorize;

use crate::app::AppContext;
use crate::config::{ConfigLoader, TaskApiConfig};
use crate::error::{Result, TaskApiError};
use crate::health::{HealthReport, HealthStatus};
use crate::{init, server};

/// Open the configured database for a one-shot command
pub async fn open_context(config: TaskApiConfig) -> Result<AppContext> {
    AppContext::open(config).await
}

/// Handle init command
pub async fn handle_init(loader: &ConfigLoader, seed: bool) -> Result<()> {
    let report = init::initialize(loader, seed).await?;

    println!("{}", "✓ taskapi initialized".green().bold());
    if report.config_written {
        println!("  Config:   {} (created)", report.config_path.display());
    } else {
        println!("  Config:   {} (kept existing)", report.config_path.display());
    }
    println!("  Database: {}", report.database_path.display());
    if seed {
        println!("  Sample tasks inserted: {}", report.seeded);
    }
    Ok(())
}

/// Handle serve command
pub async fn handle_serve(
    mut config: TaskApiConfig,
    host: Option<String>,
    port: Option<u16>,
    in_memory: bool,
) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let ctx = if in_memory {
        AppContext::in_memory(config)
    } else {
        AppContext::open(config).await?
    };

    server::serve(ctx).await
}

/// Handle health command; fails when the report is unhealthy
pub async fn handle_health(config: TaskApiConfig, format: &str) -> Result<()> {
    let ctx = open_context(config).await?;
    let report = ctx.health().await;
    ctx.close().await;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print!("{}", render_health(&report)),
        other => {
            return Err(TaskApiError::Validation(format!(
                "Unknown format '{}'. Expected text or json",
                other
            )))
        }
    }

    if report.is_unhealthy() {
        return Err(TaskApiError::Store("Health check failed".to_string()));
    }
    Ok(())
}

fn render_health(report: &HealthReport) -> String {
    let mut out = String::new();
    out.push_str("System Health Check\n");
    out.push_str("===================\n");
    out.push_str(&format!(
        "Overall: {} ({}ms)\n\n",
        colorize(report.status),
        report.total_response_time_ms
    ));

    for check in &report.checks {
        out.push_str(&format!(
            "  {:<10} {} {}\n",
            check.name,
            colorize(check.status),
            check.message.as_deref().unwrap_or("")
        ));
    }
    out
}

fn colorize(status: HealthStatus) -> colored::ColoredString {
    match status {
        HealthStatus::Healthy => status.to_string().green(),
        HealthStatus::Degraded => status.to_string().yellow(),
        HealthStatus::Unhealthy => status.to_string().red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ComponentHealth;

    #[test]
    fn test_render_health_lists_components() {
        colored::control::set_override(false);
        let report = HealthReport::new(vec![
            ComponentHealth::healthy("database", 1),
            ComponentHealth::degraded("config", "server.port is 0", 0),
        ]);

        let text = render_health(&report);
        assert!(text.contains("Overall: degraded"));
        assert!(text.contains("database"));
        assert!(text.contains("server.port is 0"));
    }

    #[tokio::test]
    async fn test_serve_rejects_invalid_override() {
        let err = handle_serve(TaskApiConfig::default(), None, Some(0), true)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskApiError::Config(_)));
    }
}
