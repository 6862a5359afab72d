use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::*, stores};
use crate::models::StoreDraft;

pub struct StoreRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StoreRepository<'a, C> {
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, draft: &StoreDraft, account_id: &str) -> Result<stores::Model> {
        let active = stores::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            account_id: Set(account_id.to_string()),
            ..Self::draft_columns(draft)
        };

        active
            .insert(self.db)
            .await
            .context("Failed to insert store")
    }

    pub async fn get(&self, id: &str) -> Result<Option<stores::Model>> {
        Stores::find_by_id(id)
            .one(self.db)
            .await
            .context("Failed to query store by ID")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<stores::Model>> {
        Stores::find()
            .filter(stores::Column::Name.eq(name))
            .one(self.db)
            .await
            .context("Failed to query store by name")
    }

    pub async fn list(&self) -> Result<Vec<stores::Model>> {
        Stores::find()
            .order_by_asc(stores::Column::Name)
            .all(self.db)
            .await
            .context("Failed to list stores")
    }

    pub async fn update(&self, id: &str, draft: &StoreDraft) -> Result<stores::Model> {
        let active = stores::ActiveModel {
            id: Unchanged(id.to_string()),
            ..Self::draft_columns(draft)
        };

        active
            .update(self.db)
            .await
            .with_context(|| format!("Failed to update store {id}"))
    }

    /// Workers assigned to the store keep existing with `store_id` cleared
    /// by the foreign key.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Stores::delete_by_id(id)
            .exec(self.db)
            .await
            .with_context(|| format!("Failed to delete store {id}"))?;

        Ok(result.rows_affected > 0)
    }

    fn draft_columns(draft: &StoreDraft) -> stores::ActiveModel {
        stores::ActiveModel {
            name: Set(draft.name.clone()),
            city: Set(draft.city.clone()),
            phone: Set(draft.phone),
            status: Set(draft.status.clone()),
            ..Default::default()
        }
    }
}
