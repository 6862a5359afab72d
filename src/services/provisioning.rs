//! Paired creation and removal of an entity and its login account.
//!
//! Each operation runs in one write transaction with a bounded duration.
//! Password hashing happens before the transaction opens so the write lock
//! is held only for the inserts. The transaction is dropped, and therefore
//! rolled back, on any early return, on timeout and on unwind; only an
//! explicit `commit` persists anything.

use sea_orm::ConnectionTrait;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::SecurityConfig;
use crate::constants::accounts::MAX_USERNAME_ATTEMPTS;
use crate::db::Storage;
use crate::db::repositories::{
    store::StoreRepository, user::UserRepository, worker::WorkerRepository,
};
use crate::domain::Role;
use crate::entities::{stores, workers};
use crate::models::{Account, StoreDraft, WorkerDraft};
use crate::services::credentials;
use crate::services::workforce_service::{Provisioned, WorkforceError};

/// Lowercases and strips all whitespace. An empty result falls back to the
/// role name so a username can always be derived.
#[must_use]
pub fn username_base(raw: &str, role: Role) -> String {
    let base: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    if base.is_empty() {
        role.as_str().to_string()
    } else {
        base
    }
}

/// First free name among `base`, `base1`, `base2`, … checked through `work`,
/// which should be the transaction that will insert the account.
pub async fn generate_unique_username<C: ConnectionTrait>(
    work: &C,
    raw: &str,
    role: Role,
) -> Result<String, WorkforceError> {
    let base = username_base(raw, role);
    let users = UserRepository::new(work);

    for attempt in 0..MAX_USERNAME_ATTEMPTS {
        let candidate = if attempt == 0 {
            base.clone()
        } else {
            format!("{base}{attempt}")
        };

        if !users.username_exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    Err(WorkforceError::UsernameSpaceExhausted(base))
}

pub struct AccountProvisioner {
    storage: Storage,
    security: SecurityConfig,
    timeout: Duration,
}

impl AccountProvisioner {
    #[must_use]
    pub const fn new(storage: Storage, security: SecurityConfig, timeout: Duration) -> Self {
        Self {
            storage,
            security,
            timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, WorkforceError>>,
    ) -> Result<T, WorkforceError> {
        if let Ok(result) = tokio::time::timeout(self.timeout, fut).await {
            result
        } else {
            warn!(operation, timeout_secs = self.timeout.as_secs(), "Transaction timed out");
            Err(WorkforceError::StorageUnavailable)
        }
    }

    pub async fn provision_worker(
        &self,
        draft: &WorkerDraft,
    ) -> Result<Provisioned<workers::Model>, WorkforceError> {
        draft.validate()?;

        if self.storage.workers().get_by_nie(draft.normalized_nie()).await?.is_some() {
            return Err(WorkforceError::AlreadyExists("Worker".to_string()));
        }

        let provisioned = self
            .bounded("provision_worker", async {
                let password_hash = credentials::hash_password_blocking(
                    draft.initial_password(),
                    self.security.clone(),
                )
                .await?;

                let txn = self.storage.begin_write().await?;
                let username = generate_unique_username(&txn, &draft.name, Role::Worker).await?;

                let account = UserRepository::new(&txn)
                    .create(&username, password_hash, Role::Worker)
                    .await
                    .map_err(|e| WorkforceError::classify(&e, "Account"))?;

                let worker = WorkerRepository::new(&txn)
                    .create(draft, &account.id)
                    .await
                    .map_err(|e| WorkforceError::classify(&e, "Worker"))?;

                txn.commit()
                    .await
                    .map_err(|e| WorkforceError::commit(&e, "Worker"))?;

                Ok(Provisioned {
                    entity: worker,
                    account: Account::from(account),
                })
            })
            .await?;

        info!(
            worker_id = %provisioned.entity.id,
            username = %provisioned.account.username,
            "Worker provisioned"
        );
        Ok(provisioned)
    }

    pub async fn provision_store(
        &self,
        draft: &StoreDraft,
    ) -> Result<Provisioned<stores::Model>, WorkforceError> {
        draft.validate()?;

        if self.storage.stores().get_by_name(&draft.name).await?.is_some() {
            return Err(WorkforceError::AlreadyExists("Store".to_string()));
        }

        let provisioned = self
            .bounded("provision_store", async {
                let password_hash = credentials::hash_password_blocking(
                    self.security.store_password.clone(),
                    self.security.clone(),
                )
                .await?;

                let txn = self.storage.begin_write().await?;
                let username = generate_unique_username(&txn, &draft.name, Role::Store).await?;

                let account = UserRepository::new(&txn)
                    .create(&username, password_hash, Role::Store)
                    .await
                    .map_err(|e| WorkforceError::classify(&e, "Account"))?;

                let store = StoreRepository::new(&txn)
                    .create(draft, &account.id)
                    .await
                    .map_err(|e| WorkforceError::classify(&e, "Store"))?;

                txn.commit()
                    .await
                    .map_err(|e| WorkforceError::commit(&e, "Store"))?;

                Ok(Provisioned {
                    entity: store,
                    account: Account::from(account),
                })
            })
            .await?;

        info!(
            store_id = %provisioned.entity.id,
            username = %provisioned.account.username,
            "Store provisioned"
        );
        Ok(provisioned)
    }

    pub async fn deprovision_worker(&self, id: &str) -> Result<(), WorkforceError> {
        self.bounded("deprovision_worker", async {
            let txn = self.storage.begin_write().await?;
            let workers = WorkerRepository::new(&txn);

            let worker = workers
                .get(id)
                .await?
                .ok_or_else(|| WorkforceError::NotFound("Worker".to_string()))?;

            workers.delete(id).await?;
            UserRepository::new(&txn).delete(&worker.account_id).await?;

            txn.commit()
                .await
                .map_err(|e| WorkforceError::commit(&e, "Worker"))
        })
        .await?;

        info!(worker_id = %id, "Worker and account removed");
        Ok(())
    }

    pub async fn deprovision_store(&self, id: &str) -> Result<(), WorkforceError> {
        self.bounded("deprovision_store", async {
            let txn = self.storage.begin_write().await?;
            let stores = StoreRepository::new(&txn);

            let store = stores
                .get(id)
                .await?
                .ok_or_else(|| WorkforceError::NotFound("Store".to_string()))?;

            stores.delete(id).await?;
            UserRepository::new(&txn).delete(&store.account_id).await?;

            txn.commit()
                .await
                .map_err(|e| WorkforceError::commit(&e, "Store"))
        })
        .await?;

        info!(store_id = %id, "Store and account removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_base() {
        assert_eq!(username_base("John Doe", Role::Worker), "johndoe");
        assert_eq!(username_base("  Tienda\tCentro\n", Role::Store), "tiendacentro");
        assert_eq!(username_base("   ", Role::Store), "store");
        assert_eq!(username_base("", Role::Worker), "worker");
    }
}
