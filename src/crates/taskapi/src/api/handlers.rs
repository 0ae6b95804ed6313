//! Task endpoint handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::AppState;
use crate::health::{HealthChecker, HealthReport};
use crate::models::{NewTask, TaskChanges, TaskRecord, TaskStatistics};

fn parse_id(id: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest(format!("Invalid task id: {}", id)))
}

/// GET /api/tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<TaskRecord>>> {
    Ok(Json(state.service.list_tasks().await?))
}

/// GET /api/tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskRecord>> {
    let id = parse_id(&id)?;

    state
        .service
        .get_task(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::task_not_found(id))
}

/// POST /api/tasks
///
/// Responds 201 with the stored record and a `Location` header.
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(input) = payload?;

    let task = state.service.create_task(input).await?;
    let location = format!("/api/tasks/{}", task.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(task),
    ))
}

/// PUT /api/tasks/:id
///
/// Body fields that are present overwrite the stored values.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskChanges>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let Json(changes) = payload?;

    let existing = state
        .service
        .get_task(id)
        .await?
        .ok_or_else(|| ApiError::task_not_found(id))?;

    state
        .service
        .update_task(changes.apply_to(existing))
        .await?
        .ok_or_else(|| ApiError::task_not_found(id))?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    if state.service.delete_task(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::task_not_found(id))
    }
}

/// GET /api/tasks/statistics
pub async fn get_statistics(State(state): State<AppState>) -> ApiResult<Json<TaskStatistics>> {
    Ok(Json(state.service.compute_statistics().await?))
}

/// GET /health
///
/// 503 when any component is unhealthy.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = HealthChecker::check_all(
        state.db.as_deref(),
        &**state.service.store(),
        &state.config,
    )
    .await;

    let status = if report.is_unhealthy() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (status, Json(report))
}
