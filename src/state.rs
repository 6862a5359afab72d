use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::db::Storage;
use crate::services::{
    AccountProvisioner, AuthService, RevocationRegistry, SeaOrmAuthService,
    SeaOrmWorkforceService, TokenService, WorkforceService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub storage: Storage,

    pub revocations: Arc<RevocationRegistry>,

    pub workforce: Arc<dyn WorkforceService>,

    pub auth: Arc<dyn AuthService>,
}

impl SharedState {
    /// Connects storage, applies migrations and bootstraps the admin account
    /// before any service is handed out.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let storage = Storage::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        storage.ensure_admin(&config.security).await?;

        Ok(Self::with_storage(config, storage))
    }

    #[must_use]
    pub fn with_storage(config: Config, storage: Storage) -> Self {
        let revocations = Arc::new(RevocationRegistry::new());
        let tokens = TokenService::from_config(&config.security);

        let provisioner = Arc::new(AccountProvisioner::new(
            storage.clone(),
            config.security.clone(),
            Duration::from_secs(config.general.transaction_timeout_secs),
        ));

        let workforce = Arc::new(SeaOrmWorkforceService::new(storage.clone(), provisioner))
            as Arc<dyn WorkforceService>;

        let auth = Arc::new(SeaOrmAuthService::new(
            storage.clone(),
            tokens,
            revocations.clone(),
        )) as Arc<dyn AuthService>;

        Self {
            config: Arc::new(config),
            storage,
            revocations,
            workforce,
            auth,
        }
    }

    /// Starts the revocation sweep for the life of the process.
    #[must_use]
    pub fn start_background_tasks(&self) -> JoinHandle<()> {
        self.revocations.spawn_sweeper(Duration::from_secs(
            self.config.security.revocation_sweep_secs.max(1),
        ))
    }
}
