//! Axum extractors for API handlers

use axum::{
    async_trait,
    extract::{FromRef, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
    Json,
};
use gig_auth::extract_bearer_token;
use gig_services::Actor;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated actor resolved from a Bearer JWT. Rejection is 401;
/// the token subject must still resolve to an active account.
pub struct AuthenticatedActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedActor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

        let token = extract_bearer_token(header_value)
            .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

        let user_id = state
            .jwt
            .get_user_id(token)
            .map_err(|e| ApiError::unauthorized(e.to_string()))?;

        let user = state
            .user_store
            .find_by_id(user_id)
            .await
            .map_err(|e| ApiError::internal(e.to_string()))?
            .ok_or_else(|| ApiError::unauthorized("Invalid token"))?;

        if !user.is_active {
            return Err(ApiError::unauthorized("Account is inactive"));
        }

        Ok(AuthenticatedActor(Actor::from(&user)))
    }
}

impl std::ops::Deref for AuthenticatedActor {
    type Target = Actor;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// JSON body extractor with the uniform 400 body on malformed input.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|_| ApiError::bad_request("Malformed JSON request"))?;
        Ok(ApiJson(value))
    }
}
