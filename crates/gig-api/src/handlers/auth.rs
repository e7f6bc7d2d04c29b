//! Registration, login, and current-user endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use gig_models::UserRole;
use gig_services::{AuthOutcome, LoginRequest, RegisterRequest, UserProfile};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{validate_payload, ApiResult};
use crate::extractors::{ApiJson, AuthenticatedActor};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub full_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    pub mobile: Option<String>,
    pub role: UserRole,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: i64,
    pub user: UserProfile,
}

impl From<AuthOutcome> for AuthResponse {
    fn from(outcome: AuthOutcome) -> Self {
        Self {
            token: outcome.token,
            expires_at: outcome.expires_at,
            user: outcome.user,
        }
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let outcome = state
        .auth
        .register(RegisterRequest {
            full_name: payload.full_name,
            email: payload.email,
            password: payload.password,
            mobile: payload.mobile,
            role: payload.role,
            bio: payload.bio,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(outcome))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let outcome = state
        .auth
        .login(LoginRequest {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    Ok(Json(AuthResponse::from(outcome)))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
) -> ApiResult<impl IntoResponse> {
    let profile = state.users.me(actor.0).await?;
    Ok(Json(profile))
}
