//! Password hashing and signed session tokens.
//!
//! Hashes are Argon2id PHC strings. Tokens are HS256 JWTs carrying the
//! account id and role; every token issued by this process is signed with
//! the configured secret.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task;

use crate::config::SecurityConfig;
use crate::domain::Role;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid")]
    TokenInvalid,
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String, CredentialError> {
    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| CredentialError::Hashing(format!("Invalid Argon2 params: {e}")))?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies against a PHC string. A malformed hash is a mismatch, not an error.
#[must_use]
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return false;
    };

    // Cost parameters are read from the PHC string itself.
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`hash_password`] on the blocking pool; Argon2 would otherwise stall the
/// async runtime.
pub async fn hash_password_blocking(
    password: String,
    config: SecurityConfig,
) -> Result<String, CredentialError> {
    task::spawn_blocking(move || hash_password(&password, &config))
        .await
        .map_err(|e| CredentialError::Hashing(format!("Hashing task panicked: {e}")))?
}

pub async fn verify_password_blocking(password: String, password_hash: String) -> bool {
    task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .unwrap_or(false)
}

/// Payload of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub id: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    #[must_use]
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours))
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, account_id: &str, role: Role) -> Result<String, CredentialError> {
        self.issue_at(account_id, role, Utc::now())
    }

    pub fn issue_at(
        &self,
        account_id: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, CredentialError> {
        let claims = Claims {
            id: account_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }

    /// Checks signature, algorithm and expiry with no leeway.
    pub fn validate(&self, token: &str) -> Result<Claims, CredentialError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => CredentialError::TokenExpired,
                _ => CredentialError::TokenInvalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn fast_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("x123", &fast_config()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("x123", &hash));
        assert!(!verify_password("x124", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let config = fast_config();
        let a = hash_password("same", &config).unwrap();
        let b = hash_password("same", &config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_token_roundtrip() {
        let tokens = TokenService::new(SECRET, Duration::hours(18));
        let token = tokens.issue("acc-1", Role::Store).unwrap();

        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims.id, "acc-1");
        assert_eq!(claims.role, Role::Store);
        assert_eq!(claims.exp - claims.iat, 18 * 3600);
    }

    #[test]
    fn test_expired_token() {
        let tokens = TokenService::new(SECRET, Duration::hours(18));
        let issued = Utc::now() - Duration::hours(18) - Duration::seconds(5);
        let token = tokens.issue_at("acc-1", Role::Admin, issued).unwrap();

        assert!(matches!(
            tokens.validate(&token),
            Err(CredentialError::TokenExpired)
        ));
    }

    #[test]
    fn test_wrong_secret_and_garbage() {
        let tokens = TokenService::new(SECRET, Duration::hours(1));
        let other = TokenService::new("another-secret-another-secret-xx", Duration::hours(1));
        let token = other.issue("acc-1", Role::Admin).unwrap();

        assert!(matches!(
            tokens.validate(&token),
            Err(CredentialError::TokenInvalid)
        ));
        assert!(matches!(
            tokens.validate("not.a.jwt"),
            Err(CredentialError::TokenInvalid)
        ));
    }
}
