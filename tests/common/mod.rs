#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use workhub::config::Config;
use workhub::models::{StoreDraft, WorkerDraft};
use workhub::state::SharedState;

pub const ADMIN_PASSWORD: &str = "admin-secret";
pub const STORE_PASSWORD: &str = "tienda-2024";

/// In-memory database on a single pooled connection; every extra
/// connection would open its own empty database.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.security.jwt_secret = "test-secret-test-secret-test-secret".to_string();
    config.security.admin_password = ADMIN_PASSWORD.to_string();
    config.security.store_password = STORE_PASSWORD.to_string();
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config
}

pub async fn spawn_state() -> Arc<SharedState> {
    Arc::new(
        SharedState::new(test_config())
            .await
            .expect("Failed to create shared state"),
    )
}

/// File-backed database with a real pool, for tests that exercise
/// concurrent connections.
pub async fn spawn_file_state(dir: &Path, max_connections: u32) -> Arc<SharedState> {
    let mut config = test_config();
    config.general.database_path = format!("sqlite:{}", dir.join("workhub.db").display());
    config.general.max_db_connections = max_connections;

    Arc::new(
        SharedState::new(config)
            .await
            .expect("Failed to create file-backed state"),
    )
}

pub fn worker_draft(name: &str, last_name: &str, nie: &str) -> WorkerDraft {
    WorkerDraft {
        name: name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", name.replace(' ', ".").to_lowercase()),
        nie: nie.to_string(),
        position: "Cashier".to_string(),
        status: "Active".to_string(),
        on_trial: "no".to_string(),
        store_id: None,
    }
}

pub fn store_draft(name: &str) -> StoreDraft {
    StoreDraft {
        name: name.to_string(),
        city: "Madrid".to_string(),
        phone: 612_345_678,
        status: "Open".to_string(),
    }
}
