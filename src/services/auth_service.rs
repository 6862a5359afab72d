//! Domain service for authentication.
//!
//! Handles login for the admin and store roles, logout through the
//! revocation registry, and validation of presented tokens.

use thiserror::Error;

use crate::services::credentials::{Claims, CredentialError};

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::TokenExpired => Self::TokenExpired,
            CredentialError::TokenInvalid => Self::TokenInvalid,
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies an admin's credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the account does not
    /// exist, is not an admin, or the password does not match.
    async fn login_admin(&self, username: &str, password: &str) -> Result<String, AuthError>;

    /// Same as [`AuthService::login_admin`] for store accounts.
    async fn login_store(&self, username: &str, password: &str) -> Result<String, AuthError>;

    /// Revokes the token for the rest of its lifetime. Accepts the raw
    /// token or the full `Bearer` header value.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Validates a presented token, rejecting revoked ones.
    fn authenticate(&self, token: &str) -> Result<Claims, AuthError>;
}
