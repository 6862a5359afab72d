//! `SeaORM` implementation of the `WorkforceService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::db::Storage;
use crate::entities::{holidays, stores, timelogs, workers};
use crate::models::{
    Account, HolidayDraft, HolidayWithWorker, StoreDraft, TimelogDraft, WorkerDraft,
};
use crate::services::provisioning::AccountProvisioner;
use crate::services::workforce_service::{Provisioned, WorkforceError, WorkforceService};

pub struct SeaOrmWorkforceService {
    storage: Storage,
    provisioner: Arc<AccountProvisioner>,
}

impl SeaOrmWorkforceService {
    #[must_use]
    pub const fn new(storage: Storage, provisioner: Arc<AccountProvisioner>) -> Self {
        Self {
            storage,
            provisioner,
        }
    }
}

fn not_found(entity: &str) -> WorkforceError {
    WorkforceError::NotFound(entity.to_string())
}

#[async_trait]
impl WorkforceService for SeaOrmWorkforceService {
    async fn create_worker(
        &self,
        draft: WorkerDraft,
    ) -> Result<Provisioned<workers::Model>, WorkforceError> {
        self.provisioner.provision_worker(&draft).await
    }

    async fn list_workers(&self) -> Result<Vec<workers::Model>, WorkforceError> {
        Ok(self.storage.workers().list().await?)
    }

    async fn get_worker(&self, id: &str) -> Result<workers::Model, WorkforceError> {
        self.storage
            .workers()
            .get(id)
            .await?
            .ok_or_else(|| not_found("Worker"))
    }

    async fn update_worker(
        &self,
        id: &str,
        draft: WorkerDraft,
    ) -> Result<workers::Model, WorkforceError> {
        draft.validate()?;

        self.storage
            .workers()
            .update(id, &draft)
            .await
            .map_err(|e| WorkforceError::classify(&e, "Worker"))
    }

    async fn delete_worker(&self, id: &str) -> Result<(), WorkforceError> {
        self.provisioner.deprovision_worker(id).await
    }

    async fn create_store(
        &self,
        draft: StoreDraft,
    ) -> Result<Provisioned<stores::Model>, WorkforceError> {
        self.provisioner.provision_store(&draft).await
    }

    async fn list_stores(&self) -> Result<Vec<stores::Model>, WorkforceError> {
        Ok(self.storage.stores().list().await?)
    }

    async fn get_store(&self, id: &str) -> Result<stores::Model, WorkforceError> {
        self.storage
            .stores()
            .get(id)
            .await?
            .ok_or_else(|| not_found("Store"))
    }

    async fn update_store(
        &self,
        id: &str,
        draft: StoreDraft,
    ) -> Result<stores::Model, WorkforceError> {
        draft.validate()?;

        self.storage
            .stores()
            .update(id, &draft)
            .await
            .map_err(|e| WorkforceError::classify(&e, "Store"))
    }

    async fn delete_store(&self, id: &str) -> Result<(), WorkforceError> {
        self.provisioner.deprovision_store(id).await
    }

    async fn create_holiday(&self, draft: HolidayDraft) -> Result<holidays::Model, WorkforceError> {
        draft.validate()?;

        let holiday = self.storage.holidays().create(&draft).await?;
        info!(holiday_id = holiday.id, worker_id = %holiday.worker_id, "Holiday recorded");
        Ok(holiday)
    }

    async fn list_holidays(&self) -> Result<Vec<holidays::Model>, WorkforceError> {
        Ok(self.storage.holidays().list().await?)
    }

    async fn list_holidays_with_worker_names(
        &self,
    ) -> Result<Vec<HolidayWithWorker>, WorkforceError> {
        Ok(self.storage.holidays().list_with_worker_names().await?)
    }

    async fn get_holiday(&self, id: i32) -> Result<holidays::Model, WorkforceError> {
        self.storage
            .holidays()
            .get(id)
            .await?
            .ok_or_else(|| not_found("Holiday"))
    }

    async fn update_holiday(
        &self,
        id: i32,
        draft: HolidayDraft,
    ) -> Result<holidays::Model, WorkforceError> {
        draft.validate()?;

        self.storage
            .holidays()
            .update(id, &draft)
            .await
            .map_err(|e| WorkforceError::classify(&e, "Holiday"))
    }

    async fn delete_holiday(&self, id: i32) -> Result<(), WorkforceError> {
        if !self.storage.holidays().delete(id).await? {
            return Err(not_found("Holiday"));
        }
        Ok(())
    }

    async fn create_timelog(&self, draft: TimelogDraft) -> Result<timelogs::Model, WorkforceError> {
        draft.validate()?;
        Ok(self.storage.timelogs().create(&draft).await?)
    }

    async fn list_timelogs(&self) -> Result<Vec<timelogs::Model>, WorkforceError> {
        Ok(self.storage.timelogs().list().await?)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, WorkforceError> {
        Ok(self.storage.users().list().await?)
    }
}
