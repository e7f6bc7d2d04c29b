//! Proposal endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use gig_core::traits::Id;
use gig_db::ProposalFilter;
use gig_models::ProposalStatus;
use gig_services::NewProposal;
use serde::Deserialize;
use validator::Validate;

use crate::error::{validate_payload, ApiResult};
use crate::extractors::{ApiJson, AuthenticatedActor};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProposalPayload {
    pub task_id: Id,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub message: String,
    pub proposed_amount: Option<f64>,
    pub estimated_duration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalStatusPayload {
    pub status: ProposalStatus,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProposalListParams {
    pub task_id: Option<Id>,
    pub professional_id: Option<Id>,
}

/// GET /api/proposals
pub async fn list(
    State(state): State<AppState>,
    _actor: AuthenticatedActor,
    Query(params): Query<ProposalListParams>,
) -> ApiResult<impl IntoResponse> {
    let proposals = state
        .proposals
        .list(ProposalFilter {
            task_id: params.task_id,
            professional_id: params.professional_id,
        })
        .await?;
    Ok(Json(proposals))
}

/// GET /api/proposals/:id
pub async fn get(
    State(state): State<AppState>,
    _actor: AuthenticatedActor,
    Path(id): Path<Id>,
) -> ApiResult<impl IntoResponse> {
    let proposal = state.proposals.get(id).await?;
    Ok(Json(proposal))
}

/// POST /api/proposals
pub async fn create(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    ApiJson(payload): ApiJson<CreateProposalPayload>,
) -> ApiResult<impl IntoResponse> {
    validate_payload(&payload)?;

    let proposal = state
        .proposals
        .create(
            actor.0,
            NewProposal {
                task_id: payload.task_id,
                message: payload.message,
                proposed_amount: payload.proposed_amount,
                estimated_duration: payload.estimated_duration,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(proposal)))
}

/// POST /api/proposals/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    actor: AuthenticatedActor,
    Path(id): Path<Id>,
    ApiJson(payload): ApiJson<ProposalStatusPayload>,
) -> ApiResult<impl IntoResponse> {
    let proposal = state
        .proposals
        .update_status(actor.0, id, payload.status)
        .await?;
    Ok(Json(proposal))
}
