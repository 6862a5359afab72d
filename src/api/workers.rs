use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;

use super::validation::validate_entity_id;
use super::{ApiError, AppState, MessageResponse};
use crate::entities::workers;
use crate::models::WorkerDraft;

#[derive(Debug, Serialize)]
pub struct WorkerCreated {
    pub message: &'static str,
    pub worker: workers::Model,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct WorkerResponse {
    pub worker: workers::Model,
}

#[derive(Debug, Serialize)]
pub struct WorkerUpdated {
    pub message: &'static str,
    pub worker: workers::Model,
}

#[derive(Debug, Serialize)]
pub struct WorkerList {
    pub workers: Vec<workers::Model>,
}

/// POST /admin/workers/create
pub async fn create_worker(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<WorkerDraft>,
) -> Result<(StatusCode, Json<WorkerCreated>), ApiError> {
    let provisioned = state.workforce().create_worker(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(WorkerCreated {
            message: "Worker created successfully",
            worker: provisioned.entity,
            username: provisioned.account.username,
        }),
    ))
}

/// GET /admin/workers
pub async fn list_workers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WorkerList>, ApiError> {
    let workers = state.workforce().list_workers().await?;
    Ok(Json(WorkerList { workers }))
}

/// GET /admin/workers/{id}
pub async fn get_worker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<WorkerResponse>, ApiError> {
    let id = validate_entity_id(&id, "worker")?;
    let worker = state.workforce().get_worker(id).await?;
    Ok(Json(WorkerResponse { worker }))
}

/// POST /admin/workers/update/{id}
pub async fn update_worker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(draft): Json<WorkerDraft>,
) -> Result<Json<WorkerUpdated>, ApiError> {
    let id = validate_entity_id(&id, "worker")?;
    let worker = state.workforce().update_worker(id, draft).await?;

    Ok(Json(WorkerUpdated {
        message: "Worker updated successfully",
        worker,
    }))
}

/// POST /admin/workers/delete/{id}
pub async fn delete_worker(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate_entity_id(&id, "worker")?;
    state.workforce().delete_worker(id).await?;
    Ok(Json(MessageResponse::new("Worker deleted successfully")))
}
