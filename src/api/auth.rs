use axum::{
    Extension, Json,
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::validation::validate_login;
use super::{ApiError, AppState, LoginRequest, MessageResponse, TokenResponse};
use crate::constants::tokens::BEARER_PREFIX;
use crate::domain::Role;
use crate::services::Claims;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const ADMIN_OR_STORE: &[Role] = &[Role::Admin, Role::Store];

/// Raw token from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Requires a valid, unrevoked bearer token. The claims and raw token are
/// attached to the request for the handlers and the role guard.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers)
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    let claims = state.auth().authenticate(&token)?;
    tracing::Span::current().record("user_id", claims.id.as_str());

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(BearerToken(token));
    Ok(next.run(request).await)
}

/// Rejects authenticated callers whose role is not in `allowed`.
pub async fn require_role(
    State(allowed): State<&'static [Role]>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let role = request
        .extensions()
        .get::<Claims>()
        .map(|claims| claims.role)
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    if !allowed.contains(&role) {
        tracing::warn!(role = %role, path = %request.uri().path(), "Role not permitted");
        return Err(ApiError::Forbidden(format!(
            "Role '{role}' is not allowed to access this resource"
        )));
    }

    Ok(next.run(request).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get(AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix(BEARER_PREFIX)
        && !token.trim().is_empty()
    {
        return Some(token.trim().to_string());
    }

    None
}

/// POST /auth/admin
pub async fn login_admin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_login(&payload.username, &payload.password)?;

    let token = state
        .auth()
        .login_admin(&payload.username, &payload.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// POST /auth/store
pub async fn login_store(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    validate_login(&payload.username, &payload.password)?;

    let token = state
        .auth()
        .login_store(&payload.username, &payload.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth().logout(&token).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_bearer(&headers), None);
    }
}
