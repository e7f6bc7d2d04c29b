//! User profile endpoints

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use gig_core::traits::Id;
use gig_models::UserRole;
use gig_services::ProfessionalProfileUpdate;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extractors::{ApiJson, AuthenticatedActor};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub role: Option<UserRole>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalProfilePayload {
    pub primary_category: Option<String>,
    pub skills: Option<Vec<String>>,
    pub hourly_rate: Option<f64>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub mobile: Option<String>,
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> ApiResult<impl IntoResponse> {
    let profiles = state.users.list(params.role).await?;
    Ok(Json(profiles))
}

/// GET /api/users/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let profile = state.users.get(id).await?;
    Ok(Json(profile))
}

/// PUT /api/users/me/professional-profile
pub async fn update_professional_profile(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    ApiJson(payload): ApiJson<ProfessionalProfilePayload>,
) -> ApiResult<impl IntoResponse> {
    let profile = state
        .users
        .update_professional_profile(
            actor.0,
            ProfessionalProfileUpdate {
                primary_category: payload.primary_category,
                skills: payload.skills,
                hourly_rate: payload.hourly_rate,
                bio: payload.bio,
                location: payload.location,
                mobile: payload.mobile,
            },
        )
        .await?;
    Ok(Json(profile))
}
