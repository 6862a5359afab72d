use anyhow::{Context, Result};
use sea_orm::sqlx::sqlite::SqliteJournalMode;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbBackend,
    DbErr, Statement, TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::constants::accounts::BOOTSTRAP_ADMIN_USERNAME;
use crate::constants::storage::BUSY_TIMEOUT;
use crate::domain::Role;
use crate::services::credentials;

pub mod migrator;
pub mod repositories;

use repositories::{
    holiday::HolidayRepository, store::StoreRepository, timelog::TimelogRepository,
    user::UserRepository, worker::WorkerRepository,
};

const RESERVE_WRITE_LOCK: &str = "UPDATE users SET id = id WHERE 0";

/// Connection pool plus repository accessors bound to it. Operations that
/// must be atomic open a transaction with [`Storage::begin_write`] and build
/// repositories over it instead.
#[derive(Clone)]
pub struct Storage {
    pub conn: DatabaseConnection,
}

impl Storage {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false)
            .map_sqlx_sqlite_opts(move |opts| {
                let opts = opts.busy_timeout(BUSY_TIMEOUT);
                if in_memory {
                    opts
                } else {
                    opts.journal_mode(SqliteJournalMode::Wal)
                }
            });

        let conn = Database::connect(opt)
            .await
            .context("Failed to connect to database")?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply migrations")?;

        info!(
            busy_timeout_ms = BUSY_TIMEOUT.as_millis(),
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Opens a transaction. It rolls back when dropped without `commit`.
    pub async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.conn.begin().await
    }

    /// Opens a transaction that already holds the database write lock.
    ///
    /// SQLite starts `BEGIN` transactions as readers, and a reader cannot
    /// become a writer once another connection has written in the meantime
    /// (`SQLITE_BUSY` without waiting). A no-op write as the first statement
    /// takes the lock up front, so concurrent writers queue on the busy
    /// timeout instead.
    pub async fn begin_write(&self) -> Result<DatabaseTransaction, DbErr> {
        let txn = self.conn.begin().await?;
        if txn.get_database_backend() == DbBackend::Sqlite {
            txn.execute_unprepared(RESERVE_WRITE_LOCK).await?;
        }
        Ok(txn)
    }

    /// Creates the `admin` account when no admin exists yet. Returns whether
    /// an account was created.
    pub async fn ensure_admin(&self, security: &SecurityConfig) -> Result<bool> {
        if self.users().role_exists(Role::Admin).await? {
            return Ok(false);
        }

        let password_hash =
            credentials::hash_password_blocking(security.admin_password.clone(), security.clone())
                .await
                .context("Failed to hash bootstrap admin password")?;

        self.users()
            .create(BOOTSTRAP_ADMIN_USERNAME, password_hash, Role::Admin)
            .await?;

        info!(username = BOOTSTRAP_ADMIN_USERNAME, "Bootstrap admin account created");
        Ok(true)
    }

    #[must_use]
    pub const fn users(&self) -> UserRepository<'_, DatabaseConnection> {
        UserRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn workers(&self) -> WorkerRepository<'_, DatabaseConnection> {
        WorkerRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn stores(&self) -> StoreRepository<'_, DatabaseConnection> {
        StoreRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn holidays(&self) -> HolidayRepository<'_, DatabaseConnection> {
        HolidayRepository::new(&self.conn)
    }

    #[must_use]
    pub const fn timelogs(&self) -> TimelogRepository<'_, DatabaseConnection> {
        TimelogRepository::new(&self.conn)
    }
}
