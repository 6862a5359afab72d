use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorResponse;
use crate::services::{AuthError, WorkforceError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    Conflict(String),

    Unauthorized(String),

    Forbidden(String),

    ServiceUnavailable(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            Self::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(msg),
            ),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            Self::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            Self::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Storage is temporarily unavailable".to_string(),
                    None,
                )
            }
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                    None,
                )
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(format!("{err:#}"))
    }
}

impl From<WorkforceError> for ApiError {
    fn from(err: WorkforceError) -> Self {
        match err {
            WorkforceError::Validation(msg) => Self::ValidationError(msg),
            WorkforceError::NotFound(entity) => Self::NotFound(format!("{entity} not found")),
            WorkforceError::AlreadyExists(entity) => {
                Self::Conflict(format!("{entity} already exists"))
            }
            WorkforceError::StorageUnavailable => {
                Self::ServiceUnavailable("transaction timed out or pool exhausted".to_string())
            }
            WorkforceError::UsernameSpaceExhausted(base) => {
                Self::Conflict(format!("No free username left for '{base}'"))
            }
            WorkforceError::Transaction(msg) | WorkforceError::Database(msg) => {
                Self::DatabaseError(msg)
            }
            err @ WorkforceError::Credentials(_) => Self::InternalError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized("Invalid credentials".to_string()),
            AuthError::TokenExpired => Self::Unauthorized("Token has expired".to_string()),
            AuthError::TokenInvalid => Self::Unauthorized("Invalid token".to_string()),
            AuthError::TokenRevoked => Self::Unauthorized("Token has been revoked".to_string()),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workforce_status_mapping() {
        let cases = [
            (WorkforceError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (WorkforceError::NotFound("Worker".into()), StatusCode::NOT_FOUND),
            (WorkforceError::AlreadyExists("Worker".into()), StatusCode::CONFLICT),
            (WorkforceError::StorageUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (
                WorkforceError::Transaction("disk I/O error".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                WorkforceError::UsernameSpaceExhausted("johndoe".into()),
                StatusCode::CONFLICT,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        for err in [
            AuthError::InvalidCredentials,
            AuthError::TokenExpired,
            AuthError::TokenInvalid,
            AuthError::TokenRevoked,
        ] {
            assert_eq!(
                ApiError::from(err).into_response().status(),
                StatusCode::UNAUTHORIZED
            );
        }
    }
}
