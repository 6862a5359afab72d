use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::Account;

#[derive(Debug, Serialize)]
pub struct AccountList {
    pub users: Vec<Account>,
}

/// GET /admin/users
pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<AccountList>, ApiError> {
    let users = state.workforce().list_accounts().await?;
    Ok(Json(AccountList { users }))
}
