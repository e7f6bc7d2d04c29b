//! Review endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use gig_core::traits::Id;
use gig_services::NewReview;
use serde::Deserialize;
use validator::Validate;

use crate::error::{validate_payload, ApiError, ApiResult};
use crate::extractors::{ApiJson, AuthenticatedActor};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewPayload {
    pub task_id: Id,
    pub reviewee_id: Id,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewListParams {
    pub user_id: Option<Id>,
}

/// GET /api/reviews?userId=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> ApiResult<impl IntoResponse> {
    let user_id = params
        .user_id
        .ok_or_else(|| ApiError::bad_request("userId query parameter is required"))?;
    let reviews = state.reviews.list_for_user(user_id).await?;
    Ok(Json(reviews))
}

/// POST /api/reviews
pub async fn create(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    ApiJson(payload): ApiJson<CreateReviewPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let review = state
        .reviews
        .create(
            actor.0,
            NewReview {
                task_id: payload.task_id,
                reviewee_id: payload.reviewee_id,
                rating: payload.rating,
                comment: payload.comment,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
