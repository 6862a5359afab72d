use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

use crate::entities::{prelude::*, timelogs};
use crate::models::TimelogDraft;

pub struct TimelogRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TimelogRepository<'a, C> {
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Appends an entry. `timestamp` is the draft's, or now when absent.
    pub async fn create(&self, draft: &TimelogDraft) -> Result<timelogs::Model> {
        let timestamp = draft
            .timestamp
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        let active = timelogs::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            store_id: Set(draft.store_id.clone()),
            worker_id: Set(draft.worker_id.clone()),
            direction: Set(draft.direction.clone()),
            timestamp: Set(timestamp),
        };

        active
            .insert(self.db)
            .await
            .context("Failed to insert timelog")
    }

    pub async fn list(&self) -> Result<Vec<timelogs::Model>> {
        Timelogs::find()
            .order_by_desc(timelogs::Column::Timestamp)
            .all(self.db)
            .await
            .context("Failed to list timelogs")
    }
}
