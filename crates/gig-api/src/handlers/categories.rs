//! Category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use gig_core::traits::Id;
use gig_services::{NewCategory, UpdateCategory};
use serde::Deserialize;
use validator::Validate;

use crate::error::{validate_payload, ApiResult};
use crate::extractors::{ApiJson, AuthenticatedActor};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// GET /api/categories
pub async fn list(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = state.categories.list().await?;
    Ok(Json(categories))
}

/// GET /api/categories/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let category = state.categories.get(id).await?;
    Ok(Json(category))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    _actor: AuthenticatedActor,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let category = state
        .categories
        .create(NewCategory {
            name: payload.name,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/:id
pub async fn update(
    State(state): State<AppState>,
    _actor: AuthenticatedActor,
    Path(id): Path<Id>,
    ApiJson(payload): ApiJson<CategoryPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let category = state
        .categories
        .update(
            id,
            UpdateCategory {
                name: payload.name,
                description: payload.description,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(category))
}
