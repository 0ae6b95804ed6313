//! HTTP server lifecycle

use tokio::net::TcpListener;
use tracing::info;

use crate::api::create_router;
use crate::app::AppContext;
use crate::error::Result;

/// Serve the API on the configured address until SIGINT/SIGTERM
pub async fn serve(ctx: AppContext) -> Result<()> {
    if ctx.config().database.seed_sample_data {
        ctx.seed_if_empty().await?;
    }

    let addr = ctx.config().server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!(address = %listener.local_addr()?, "Task API listening");

    let app = create_router(ctx.app_state());

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ctx.close().await;
    info!("Server shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
