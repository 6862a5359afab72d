use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use std::sync::Arc;

use super::validation::validate_holiday_id;
use super::{ApiError, AppState, MessageResponse};
use crate::entities::holidays;
use crate::models::{HolidayDraft, HolidayWithWorker};

#[derive(Debug, Serialize)]
pub struct HolidaySaved {
    pub message: &'static str,
    pub holiday: holidays::Model,
}

#[derive(Debug, Serialize)]
pub struct HolidayResponse {
    pub holiday: holidays::Model,
}

#[derive(Debug, Serialize)]
pub struct HolidayList<T> {
    pub holidays: Vec<T>,
}

/// POST /admin/holidays/create
pub async fn create_holiday(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<HolidayDraft>,
) -> Result<(StatusCode, Json<HolidaySaved>), ApiError> {
    let holiday = state.workforce().create_holiday(draft).await?;

    Ok((
        StatusCode::CREATED,
        Json(HolidaySaved {
            message: "Holiday created successfully",
            holiday,
        }),
    ))
}

/// GET /admin/holidays
pub async fn list_holidays(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HolidayList<holidays::Model>>, ApiError> {
    let holidays = state.workforce().list_holidays().await?;
    Ok(Json(HolidayList { holidays }))
}

/// GET /admin/holidays/workers
///
/// Holidays joined with the worker's name and last name.
pub async fn list_holidays_with_workers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HolidayList<HolidayWithWorker>>, ApiError> {
    let holidays = state.workforce().list_holidays_with_worker_names().await?;
    Ok(Json(HolidayList { holidays }))
}

/// GET /admin/holidays/{id}
pub async fn get_holiday(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<HolidayResponse>, ApiError> {
    let id = validate_holiday_id(id)?;
    let holiday = state.workforce().get_holiday(id).await?;
    Ok(Json(HolidayResponse { holiday }))
}

/// POST /admin/holidays/update/{id}
pub async fn update_holiday(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(draft): Json<HolidayDraft>,
) -> Result<Json<HolidaySaved>, ApiError> {
    let id = validate_holiday_id(id)?;
    let holiday = state.workforce().update_holiday(id, draft).await?;

    Ok(Json(HolidaySaved {
        message: "Holiday updated successfully",
        holiday,
    }))
}

/// POST /admin/holidays/delete/{id}
pub async fn delete_holiday(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validate_holiday_id(id)?;
    state.workforce().delete_holiday(id).await?;
    Ok(Json(MessageResponse::new("Holiday deleted successfully")))
}
