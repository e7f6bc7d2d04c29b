//! Task endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use gig_core::traits::Id;
use gig_db::TaskFilter;
use gig_models::{TaskPriority, TaskStatus};
use gig_services::NewTask;
use serde::Deserialize;
use validator::Validate;

use crate::error::{validate_payload, ApiResult};
use crate::extractors::{ApiJson, AuthenticatedActor};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
    pub category_id: Id,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub priority: Option<TaskPriority>,
    pub deadline: Option<DateTime<Utc>>,
    pub required_skills: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub is_remote: bool,
    pub estimated_duration: Option<String>,
    pub assigned_professional_id: Option<Id>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusPayload {
    pub status: TaskStatus,
    pub assigned_professional_id: Option<Id>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPayload {
    pub professional_id: Id,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub status: Option<TaskStatus>,
    pub category_id: Option<Id>,
    pub client_id: Option<Id>,
}

/// GET /api/tasks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> ApiResult<impl IntoResponse> {
    let tasks = state
        .tasks
        .list(TaskFilter {
            status: params.status,
            category_id: params.category_id,
            client_id: params.client_id,
        })
        .await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let task = state.tasks.get(id).await?;
    Ok(Json(task))
}

/// POST /api/tasks
pub async fn create(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    ApiJson(payload): ApiJson<CreateTaskPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let task = state
        .tasks
        .create(
            actor.0,
            NewTask {
                title: payload.title,
                description: payload.description,
                category_id: payload.category_id,
                budget_min: payload.budget_min,
                budget_max: payload.budget_max,
                priority: payload.priority,
                deadline: payload.deadline,
                required_skills: payload.required_skills,
                location: payload.location,
                is_remote: payload.is_remote,
                estimated_duration: payload.estimated_duration,
                assigned_professional_id: payload.assigned_professional_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// POST /api/tasks/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    Path(id): Path<Id>,
    ApiJson(payload): ApiJson<TaskStatusPayload>,
) -> ApiResult<impl IntoResponse> {
    let task = state
        .tasks
        .update_status(actor.0, id, payload.status, payload.assigned_professional_id)
        .await?;
    Ok(Json(task))
}

/// POST /api/tasks/:id/assign
pub async fn assign(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    Path(id): Path<Id>,
    ApiJson(payload): ApiJson<AssignPayload>,
) -> ApiResult<impl IntoResponse> {
    let task = state
        .tasks
        .assign_professional(actor.0, id, payload.professional_id)
        .await?;
    Ok(Json(task))
}

/// DELETE /api/tasks/:id
pub async fn delete(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    state.tasks.delete(actor.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
