use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Unchanged},
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::*, workers};
use crate::models::WorkerDraft;

pub struct WorkerRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkerRepository<'a, C> {
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, draft: &WorkerDraft, account_id: &str) -> Result<workers::Model> {
        let active = workers::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            account_id: Set(account_id.to_string()),
            ..Self::draft_columns(draft)
        };

        active
            .insert(self.db)
            .await
            .context("Failed to insert worker")
    }

    pub async fn get(&self, id: &str) -> Result<Option<workers::Model>> {
        Workers::find_by_id(id)
            .one(self.db)
            .await
            .context("Failed to query worker by ID")
    }

    pub async fn get_by_nie(&self, nie: &str) -> Result<Option<workers::Model>> {
        Workers::find()
            .filter(workers::Column::Nie.eq(nie))
            .one(self.db)
            .await
            .context("Failed to query worker by nie")
    }

    pub async fn list(&self) -> Result<Vec<workers::Model>> {
        Workers::find()
            .order_by_asc(workers::Column::LastName)
            .order_by_asc(workers::Column::Name)
            .all(self.db)
            .await
            .context("Failed to list workers")
    }

    /// Writes the draft columns only; `id`, `account_id` and an omitted
    /// `store_id` are left as stored.
    pub async fn update(&self, id: &str, draft: &WorkerDraft) -> Result<workers::Model> {
        let active = workers::ActiveModel {
            id: Unchanged(id.to_string()),
            ..Self::draft_columns(draft)
        };

        active
            .update(self.db)
            .await
            .with_context(|| format!("Failed to update worker {id}"))
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Workers::delete_by_id(id)
            .exec(self.db)
            .await
            .with_context(|| format!("Failed to delete worker {id}"))?;

        Ok(result.rows_affected > 0)
    }

    fn draft_columns(draft: &WorkerDraft) -> workers::ActiveModel {
        workers::ActiveModel {
            name: Set(draft.name.clone()),
            last_name: Set(draft.last_name.clone()),
            email: Set(draft.email.clone()),
            nie: Set(draft.normalized_nie().to_string()),
            position: Set(draft.position.clone()),
            status: Set(draft.status.clone()),
            on_trial: Set(draft.on_trial.clone()),
            store_id: draft.store_id.clone().map_or(NotSet, Set),
            ..Default::default()
        }
    }
}
