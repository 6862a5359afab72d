//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::constants::tokens::BEARER_PREFIX;
use crate::db::Storage;
use crate::domain::Role;
use crate::services::auth_service::{AuthError, AuthService};
use crate::services::credentials::{self, Claims, TokenService};
use crate::services::revocation::RevocationRegistry;

pub struct SeaOrmAuthService {
    storage: Storage,
    tokens: TokenService,
    revocations: Arc<RevocationRegistry>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(
        storage: Storage,
        tokens: TokenService,
        revocations: Arc<RevocationRegistry>,
    ) -> Self {
        Self {
            storage,
            tokens,
            revocations,
        }
    }

    async fn login_as(&self, role: Role, username: &str, password: &str) -> Result<String, AuthError> {
        let username = username.trim().to_lowercase();
        let username = username.as_str();
        let account = self.storage.users().get_by_username(username).await?;

        // Absent account, wrong role and wrong password are indistinguishable
        // to the caller.
        let Some(account) = account.filter(|a| a.role == role.as_str()) else {
            warn!(username, role = %role, "Login rejected: no matching account");
            return Err(AuthError::InvalidCredentials);
        };

        if !credentials::verify_password_blocking(password.to_string(), account.password_hash)
            .await
        {
            warn!(username, role = %role, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account.id, role)?;
        info!(username, role = %role, "Login succeeded");
        Ok(token)
    }
}

fn strip_bearer(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim()
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login_admin(&self, username: &str, password: &str) -> Result<String, AuthError> {
        self.login_as(Role::Admin, username, password).await
    }

    async fn login_store(&self, username: &str, password: &str) -> Result<String, AuthError> {
        self.login_as(Role::Store, username, password).await
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let token = strip_bearer(token);
        if token.is_empty() {
            return Err(AuthError::TokenInvalid);
        }

        self.revocations.revoke(token, self.tokens.ttl());
        info!("Token revoked");
        Ok(())
    }

    fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        let token = strip_bearer(token);

        if self.revocations.is_revoked(token) {
            return Err(AuthError::TokenRevoked);
        }

        Ok(self.tokens.validate(token)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_bearer() {
        assert_eq!(strip_bearer("Bearer abc.def"), "abc.def");
        assert_eq!(strip_bearer("abc.def"), "abc.def");
        assert_eq!(strip_bearer("Bearer "), "");
    }
}
