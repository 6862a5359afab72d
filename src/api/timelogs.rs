use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::entities::timelogs;
use crate::models::TimelogDraft;

#[derive(Debug, Serialize)]
pub struct TimelogCreated {
    pub message: &'static str,
    pub timelog: timelogs::Model,
}

#[derive(Debug, Serialize)]
pub struct TimelogList {
    pub timelogs: Vec<timelogs::Model>,
}

/// POST /admin/timelog/create
///
/// Open to admins and store terminals.
pub async fn create_timelog(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<TimelogDraft>,
) -> Result<(StatusCode, Json<TimelogCreated>), ApiError> {
    let timelog = state.workforce().create_timelog(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(TimelogCreated {
            message: "Timelog created successfully",
            timelog,
        }),
    ))
}

/// GET /admin/timelogs
pub async fn list_timelogs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimelogList>, ApiError> {
    let timelogs = state.workforce().list_timelogs().await?;
    Ok(Json(TimelogList { timelogs }))
}
