//! Domain service for workers, stores, holidays and timelogs.
//!
//! Worker and store creation/deletion go through the account provisioner so
//! that each entity and its login account are written or removed together.

use async_trait::async_trait;
use sea_orm::{DbErr, RuntimeErr, SqlErr, sqlx};
use thiserror::Error;

use crate::entities::{holidays, stores, timelogs, workers};
use crate::models::{
    Account, HolidayDraft, HolidayWithWorker, StoreDraft, TimelogDraft, ValidationError,
    WorkerDraft,
};
use crate::services::credentials::CredentialError;

#[derive(Debug, Error)]
pub enum WorkforceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("No free username left for '{0}'")]
    UsernameSpaceExhausted(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Storage unavailable")]
    StorageUnavailable,

    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),

    #[error("Database error: {0}")]
    Database(String),
}

impl WorkforceError {
    /// Classifies a storage failure. `entity` names what the failing write
    /// was about, for constraint violations.
    #[must_use]
    pub fn classify(err: &anyhow::Error, entity: &str) -> Self {
        match err.downcast_ref::<DbErr>() {
            Some(db_err) => Self::from_db(db_err, entity),
            None => Self::Database(format!("{err:#}")),
        }
    }

    fn from_db(err: &DbErr, entity: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::AlreadyExists(entity.to_string()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::NotFound("Referenced store".to_string())
            }
            _ => match err {
                DbErr::RecordNotUpdated | DbErr::RecordNotFound(_) => {
                    Self::NotFound(entity.to_string())
                }
                DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => Self::StorageUnavailable,
                other if is_lock_contention(other) => Self::StorageUnavailable,
                other => Self::Database(other.to_string()),
            },
        }
    }

    /// Maps a failed `commit`; constraint violations surfacing at commit
    /// time are still reported as conflicts.
    #[must_use]
    pub fn commit(err: &DbErr, entity: &str) -> Self {
        match Self::from_db(err, entity) {
            Self::Database(msg) => Self::Transaction(msg),
            other => other,
        }
    }
}

const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// `SQLITE_BUSY` or `SQLITE_LOCKED`, including their extended codes, once the
/// busy timeout has run out.
fn is_lock_contention(err: &DbErr) -> bool {
    let (DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(e)))
    | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(e)))) = err
    else {
        return false;
    };

    e.code()
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, SQLITE_BUSY | SQLITE_LOCKED))
}

impl From<DbErr> for WorkforceError {
    fn from(err: DbErr) -> Self {
        Self::from_db(&err, "Record")
    }
}

impl From<anyhow::Error> for WorkforceError {
    fn from(err: anyhow::Error) -> Self {
        Self::classify(&err, "Record")
    }
}

impl From<ValidationError> for WorkforceError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

/// An entity together with the account provisioned for it.
#[derive(Debug, Clone)]
pub struct Provisioned<T> {
    pub entity: T,
    pub account: Account,
}

#[async_trait]
pub trait WorkforceService: Send + Sync {
    /// Creates the worker and its `worker` account in one transaction.
    ///
    /// # Errors
    ///
    /// [`WorkforceError::AlreadyExists`] when the `nie` is taken.
    async fn create_worker(
        &self,
        draft: WorkerDraft,
    ) -> Result<Provisioned<workers::Model>, WorkforceError>;

    async fn list_workers(&self) -> Result<Vec<workers::Model>, WorkforceError>;

    async fn get_worker(&self, id: &str) -> Result<workers::Model, WorkforceError>;

    async fn update_worker(
        &self,
        id: &str,
        draft: WorkerDraft,
    ) -> Result<workers::Model, WorkforceError>;

    /// Removes the worker and its account together.
    async fn delete_worker(&self, id: &str) -> Result<(), WorkforceError>;

    async fn create_store(
        &self,
        draft: StoreDraft,
    ) -> Result<Provisioned<stores::Model>, WorkforceError>;

    async fn list_stores(&self) -> Result<Vec<stores::Model>, WorkforceError>;

    async fn get_store(&self, id: &str) -> Result<stores::Model, WorkforceError>;

    async fn update_store(
        &self,
        id: &str,
        draft: StoreDraft,
    ) -> Result<stores::Model, WorkforceError>;

    /// Removes the store and its account; its workers become unassigned.
    async fn delete_store(&self, id: &str) -> Result<(), WorkforceError>;

    async fn create_holiday(&self, draft: HolidayDraft) -> Result<holidays::Model, WorkforceError>;

    async fn list_holidays(&self) -> Result<Vec<holidays::Model>, WorkforceError>;

    async fn list_holidays_with_worker_names(
        &self,
    ) -> Result<Vec<HolidayWithWorker>, WorkforceError>;

    async fn get_holiday(&self, id: i32) -> Result<holidays::Model, WorkforceError>;

    async fn update_holiday(
        &self,
        id: i32,
        draft: HolidayDraft,
    ) -> Result<holidays::Model, WorkforceError>;

    async fn delete_holiday(&self, id: i32) -> Result<(), WorkforceError>;

    async fn create_timelog(&self, draft: TimelogDraft) -> Result<timelogs::Model, WorkforceError>;

    async fn list_timelogs(&self) -> Result<Vec<timelogs::Model>, WorkforceError>;

    /// All accounts, without password hashes.
    async fn list_accounts(&self) -> Result<Vec<Account>, WorkforceError>;
}
