//! Service error taxonomy
//!
//! NotFound: a referenced id does not resolve. BadRequest: a business rule
//! was violated. Conflict: a uniqueness invariant was violated. All are
//! surfaced synchronously; nothing here is retryable.

use gig_core::traits::Id;
use gig_db::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found with id {id}")]
    NotFound { entity: &'static str, id: Id },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: Id) -> Self {
        ServiceError::NotFound { entity, id }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
