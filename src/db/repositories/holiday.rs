use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ConnectionTrait, EntityTrait, JoinType, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::{holidays, prelude::*, workers};
use crate::models::{HolidayDraft, HolidayWithWorker};

pub struct HolidayRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HolidayRepository<'a, C> {
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, draft: &HolidayDraft) -> Result<holidays::Model> {
        Self::draft_columns(draft)
            .insert(self.db)
            .await
            .context("Failed to insert holiday")
    }

    pub async fn get(&self, id: i32) -> Result<Option<holidays::Model>> {
        Holidays::find_by_id(id)
            .one(self.db)
            .await
            .context("Failed to query holiday by ID")
    }

    pub async fn list(&self) -> Result<Vec<holidays::Model>> {
        Holidays::find()
            .order_by_asc(holidays::Column::StartDate)
            .all(self.db)
            .await
            .context("Failed to list holidays")
    }

    /// Every holiday with its worker's name; the name columns are `None`
    /// once the worker has been removed.
    pub async fn list_with_worker_names(&self) -> Result<Vec<HolidayWithWorker>> {
        Holidays::find()
            .select_only()
            .column(holidays::Column::Id)
            .column(holidays::Column::WorkerId)
            .column(holidays::Column::StartDate)
            .column(holidays::Column::EndDate)
            .column(holidays::Column::Status)
            .column_as(workers::Column::Name, "worker_name")
            .column_as(workers::Column::LastName, "worker_last_name")
            .join(
                JoinType::LeftJoin,
                holidays::Entity::belongs_to(workers::Entity)
                    .from(holidays::Column::WorkerId)
                    .to(workers::Column::Id)
                    .into(),
            )
            .order_by_asc(holidays::Column::StartDate)
            .into_model::<HolidayWithWorker>()
            .all(self.db)
            .await
            .context("Failed to list holidays with worker names")
    }

    pub async fn update(&self, id: i32, draft: &HolidayDraft) -> Result<holidays::Model> {
        let active = holidays::ActiveModel {
            id: Unchanged(id),
            ..Self::draft_columns(draft)
        };

        active
            .update(self.db)
            .await
            .with_context(|| format!("Failed to update holiday {id}"))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Holidays::delete_by_id(id)
            .exec(self.db)
            .await
            .with_context(|| format!("Failed to delete holiday {id}"))?;

        Ok(result.rows_affected > 0)
    }

    fn draft_columns(draft: &HolidayDraft) -> holidays::ActiveModel {
        holidays::ActiveModel {
            worker_id: Set(draft.worker_id.clone()),
            start_date: Set(draft.start_date.clone()),
            end_date: Set(draft.end_date.clone()),
            status: Set(draft.status.clone()),
            ..Default::default()
        }
    }
}
