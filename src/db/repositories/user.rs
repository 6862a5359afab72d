use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::Role;
use crate::entities::{prelude::*, users};
use crate::models::Account;

pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    #[must_use]
    pub const fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        username: &str,
        password_hash: String,
        role: Role,
    ) -> Result<users::Model> {
        let active = users::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        active
            .insert(self.db)
            .await
            .with_context(|| format!("Failed to insert account '{username}'"))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<users::Model>> {
        Users::find_by_id(id)
            .one(self.db)
            .await
            .context("Failed to query account by ID")
    }

    /// Includes the password hash; callers outside authentication should
    /// convert to [`Account`].
    pub async fn get_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(self.db)
            .await
            .context("Failed to query account by username")
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::Username.eq(username))
            .count(self.db)
            .await
            .context("Failed to check username availability")?;

        Ok(count > 0)
    }

    pub async fn role_exists(&self, role: Role) -> Result<bool> {
        let count = Users::find()
            .filter(users::Column::Role.eq(role.as_str()))
            .count(self.db)
            .await
            .context("Failed to count accounts by role")?;

        Ok(count > 0)
    }

    pub async fn list(&self) -> Result<Vec<Account>> {
        let rows = Users::find()
            .order_by_asc(users::Column::Username)
            .all(self.db)
            .await
            .context("Failed to list accounts")?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(self.db)
            .await
            .with_context(|| format!("Failed to delete account {id}"))?;

        Ok(result.rows_affected > 0)
    }
}
