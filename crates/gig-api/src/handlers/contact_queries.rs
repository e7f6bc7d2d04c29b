//! Contact query endpoints. Submission is public; everything else is
//! admin-gated inside the service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use gig_core::traits::Id;
use gig_models::QueryStatus;
use gig_services::{NewContactQuery, QueryResponse};
use serde::Deserialize;
use validator::Validate;

use crate::error::{validate_payload, ApiResult};
use crate::extractors::{ApiJson, AuthenticatedActor};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQueryPayload {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    pub mobile: Option<String>,
    pub query_type: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondPayload {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub admin_response: String,
    pub status: QueryStatus,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QueryListParams {
    pub status: Option<QueryStatus>,
}

/// POST /api/contact-queries (public)
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SubmitQueryPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let query = state
        .contact_queries
        .submit(NewContactQuery {
            name: payload.name,
            email: payload.email,
            mobile: payload.mobile,
            query_type: payload.query_type,
            message: payload.message,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(query)))
}

/// GET /api/contact-queries
pub async fn list(
    State(state): State<AppState>,
    _actor: AuthenticatedActor,
    Query(params): Query<QueryListParams>,
) -> ApiResult<impl IntoResponse> {
    let queries = state.contact_queries.list(params.status).await?;
    Ok(Json(queries))
}

/// GET /api/contact-queries/:id
pub async fn get(
    State(state): State<AppState>,
    _actor: AuthenticatedActor,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let query = state.contact_queries.get(id).await?;
    Ok(Json(query))
}

/// POST /api/contact-queries/:id/respond
pub async fn respond(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    Path(id): Path<Id>,
    ApiJson(payload): ApiJson<RespondPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let query = state
        .contact_queries
        .respond(
            actor.0,
            id,
            QueryResponse {
                admin_response: payload.admin_response,
                status: payload.status,
            },
        )
        .await?;

    Ok(Json(query))
}
