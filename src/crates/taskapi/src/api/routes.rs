//! API route definitions

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::handlers;
use crate::config::TaskApiConfig;
use crate::db::Database;
use crate::services::TaskService;

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub service: TaskService,
    /// Absent when the service runs on an in-memory store
    pub db: Option<Arc<Database>>,
    pub config: Arc<TaskApiConfig>,
}

impl AppState {
    pub fn new(service: TaskService, db: Option<Arc<Database>>, config: TaskApiConfig) -> Self {
        Self {
            service,
            db,
            config: Arc::new(config),
        }
    }
}

/// Build the complete API router
pub fn create_router(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route("/api/tasks/statistics", get(handlers::get_statistics))
        .route(
            "/api/tasks/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .layer(trace)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
