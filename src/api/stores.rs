use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;

use super::validation::validate_entity_id;
use super::{ApiError, AppState, MessageResponse};
use crate::entities::stores;
use crate::models::StoreDraft;

#[derive(Debug, Serialize)]
pub struct StoreCreated {
    pub message: &'static str,
    pub store: stores::Model,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub store: stores::Model,
}

#[derive(Debug, Serialize)]
pub struct StoreUpdated {
    pub message: &'static str,
    pub store: stores::Model,
}

#[derive(Debug, Serialize)]
pub struct StoreList {
    pub stores: Vec<stores::Model>,
}

/// POST /admin/stores/create
pub async fn create_store(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<StoreDraft>,
) -> Result<(StatusCode, Json<StoreCreated>), ApiError> {
    let provisioned = state.workforce().create_store(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(StoreCreated {
            message: "Store created successfully",
            store: provisioned.entity,
            username: provisioned.account.username,
        }),
    ))
}

/// GET /admin/stores
pub async fn list_stores(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StoreList>, ApiError> {
    let stores = state.workforce().list_stores().await?;
    Ok(Json(StoreList { stores }))
}

/// GET /admin/stores/{id}
pub async fn get_store(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StoreResponse>, ApiError> {
    let id = validate_entity_id(&id, "store")?;
    let store = state.workforce().get_store(id).await?;
    Ok(Json(StoreResponse { store }))
}

/// POST /admin/stores/update/{id}
pub async fn update_store(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<StoreDraft>,
) -> Result<Json<StoreUpdated>, ApiError> {
    let id = validate_entity_id(&id, "store")?;
    let store = state.workforce().update_store(id, draft).await?;

    Ok(Json(StoreUpdated {
        message: "Store updated successfully",
        store,
    }))
}

/// POST /admin/stores/delete/{id}
pub async fn delete_store(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate_entity_id(&id, "store")?;
    state.workforce().delete_store(id).await?;
    Ok(Json(MessageResponse::new("Store deleted successfully")))
}
