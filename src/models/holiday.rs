use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use super::{ValidationError, require, require_one_of};
use crate::domain::HolidayStatus;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Deserialize)]
pub struct HolidayDraft {
    pub worker_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl HolidayDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.worker_id, "worker_id")?;

        let start = NaiveDate::parse_from_str(&self.start_date, DATE_FORMAT)
            .map_err(|_| ValidationError::new("start_date must use the YYYY-MM-DD format"))?;
        let end = NaiveDate::parse_from_str(&self.end_date, DATE_FORMAT)
            .map_err(|_| ValidationError::new("end_date must use the YYYY-MM-DD format"))?;

        if end < start {
            return Err(ValidationError::new(
                "end_date cannot be earlier than start_date",
            ));
        }

        require_one_of(
            &self.status,
            "status",
            HolidayStatus::ALL,
            HolidayStatus::parse(&self.status).is_some(),
        )?;

        Ok(())
    }
}

/// Holiday row joined with the name of its worker, if the worker still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct HolidayWithWorker {
    pub id: i32,
    pub worker_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub worker_name: Option<String>,
    pub worker_last_name: Option<String>,
}
