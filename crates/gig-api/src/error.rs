//! API error handling
//!
//! Maps service errors onto HTTP statuses with a uniform JSON body:
//! `{ status, error, message, path?, validationErrors? }`.

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use gig_core::error::ValidationErrors;
use gig_db::RepositoryError;
use gig_services::ServiceError;
use serde::Serialize;
use validator::Validate;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    Validation(ValidationErrors),
    Internal(String),
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_label(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "Not Found",
            ApiError::BadRequest(_) => "Bad Request",
            ApiError::Conflict(_) => "Conflict",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::Validation(_) => "Validation Failed",
            ApiError::Internal(_) => "Internal Server Error",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ServiceError::BadRequest(msg) => ApiError::BadRequest(msg),
            ServiceError::Conflict(msg) => ApiError::Conflict(msg),
            ServiceError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            ServiceError::Internal(msg) => ApiError::Internal(msg),
            ServiceError::Repository(repo) => match repo {
                RepositoryError::NotFound(msg) => ApiError::NotFound(msg),
                RepositoryError::Conflict(msg) => ApiError::Conflict(msg),
                RepositoryError::Database(e) => ApiError::Internal(e.to_string()),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status: u16,
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_errors: Option<HashMap<String, String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            ApiError::Validation(ref errors) => ErrorBody {
                status: status.as_u16(),
                error: self.error_label(),
                message: "Validation failed".into(),
                validation_errors: Some(errors.errors.clone()),
            },
            ApiError::Internal(ref msg) => {
                tracing::error!(error = %msg, "internal server error");
                ErrorBody {
                    status: status.as_u16(),
                    error: self.error_label(),
                    message: "Internal server error".into(),
                    validation_errors: None,
                }
            }
            ApiError::NotFound(ref msg)
            | ApiError::BadRequest(ref msg)
            | ApiError::Conflict(ref msg)
            | ApiError::Unauthorized(ref msg) => ErrorBody {
                status: status.as_u16(),
                error: self.error_label(),
                message: msg.clone(),
                validation_errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Middleware that stamps the request path into the uniform error body.
/// Non-error responses and foreign bodies pass through untouched.
pub async fn attach_request_path(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return Response::from_parts(parts, Body::empty()),
    };

    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(serde_json::Value::Object(mut map)) if map.contains_key("status") => {
            map.insert("path".into(), serde_json::Value::String(path));
            match serde_json::to_vec(&map) {
                Ok(body) => {
                    parts.headers.remove(header::CONTENT_LENGTH);
                    Response::from_parts(parts, Body::from(body))
                }
                Err(_) => Response::from_parts(parts, Body::from(bytes)),
            }
        }
        _ => Response::from_parts(parts, Body::from(bytes)),
    }
}

/// Run derive-based validation on a request payload, converting field
/// failures into the `validationErrors` response map.
pub fn validate_payload<T: Validate>(payload: &T) -> ApiResult<()> {
    payload.validate().map_err(|failures| {
        let mut errors = ValidationErrors::new();
        for (field, field_errors) in failures.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                errors.add(field, message);
            }
        }
        ApiError::Validation(errors)
    })
}
