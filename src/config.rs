use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Minimum accepted length for the token signing secret.
pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub security: SecurityConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,

    /// Upper bound for a single provisioning/deprovisioning transaction.
    pub transaction_timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/workhub.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
            transaction_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub enabled: bool,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8080,
            cors_allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// HMAC key used to sign and verify every token issued by this process.
    /// Rotating it invalidates all outstanding tokens.
    pub jwt_secret: String,

    /// Lifetime of an issued token, also used as the logout revocation window.
    pub token_ttl_hours: i64,

    /// Shared initial password given to every provisioned store account.
    pub store_password: String,

    /// Password for the `admin` account created when no admin exists yet.
    pub admin_password: String,

    /// Argon2 memory cost in KiB
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism
    pub argon2_parallelism: u32,

    /// How often expired entries are swept from the revocation registry.
    pub revocation_sweep_secs: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: crate::constants::tokens::DEFAULT_TTL_HOURS,
            store_password: String::new(),
            admin_password: String::new(),
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
            revocation_sweep_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `.env` and
    /// `WORKHUB_*` environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(&path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary key lookup; split out so tests do
    /// not have to mutate the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("WORKHUB_DATABASE_URL") {
            self.general.database_path = url;
        }
        if let Some(level) = lookup("WORKHUB_LOG_LEVEL") {
            self.general.log_level = level;
        }
        if let Some(port) = lookup("WORKHUB_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(secret) = lookup("WORKHUB_JWT_SECRET") {
            self.security.jwt_secret = secret;
        }
        if let Some(password) = lookup("WORKHUB_STORE_PASSWORD") {
            self.security.store_password = password;
        }
        if let Some(password) = lookup("WORKHUB_ADMIN_PASSWORD") {
            self.security.admin_password = password;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("workhub").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".workhub").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    /// Writes a default config with a freshly generated signing secret.
    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            return Ok(false);
        }

        let mut config = Self::default();
        config.security.jwt_secret = generate_secret();
        config.save_to_path(&path)?;
        info!("Created default config file: {}", path.display());
        Ok(true)
    }

    pub fn validate(&self) -> Result<()> {
        if self.security.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            anyhow::bail!(
                "security.jwt_secret must be at least {MIN_JWT_SECRET_LEN} characters (set WORKHUB_JWT_SECRET)"
            );
        }

        if self.security.store_password.is_empty() {
            anyhow::bail!("security.store_password cannot be empty (set WORKHUB_STORE_PASSWORD)");
        }

        if self.security.admin_password.is_empty() {
            anyhow::bail!("security.admin_password cannot be empty (set WORKHUB_ADMIN_PASSWORD)");
        }

        if self.security.token_ttl_hours <= 0 {
            anyhow::bail!("security.token_ttl_hours must be > 0");
        }

        if self.general.transaction_timeout_secs == 0 {
            anyhow::bail!("general.transaction_timeout_secs must be > 0");
        }

        Ok(())
    }
}

/// Generate a random 64 character hex secret
#[must_use]
pub fn generate_secret() -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    let bytes: [u8; 32] = rng.random();

    bytes.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.security.jwt_secret = "x".repeat(MIN_JWT_SECRET_LEN);
        config.security.store_password = "tienda".to_string();
        config.security.admin_password = "admin-secret".to_string();
        config
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.security.token_ttl_hours, 18);
        assert_eq!(config.security.revocation_sweep_secs, 60);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.general.transaction_timeout_secs, 10);
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.security.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_passwords() {
        let mut config = valid_config();
        config.security.store_password.clear();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.security.admin_password.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "WORKHUB_PORT" => Some("9090".to_string()),
            "WORKHUB_STORE_PASSWORD" => Some("shared".to_string()),
            "WORKHUB_DATABASE_URL" => Some("sqlite::memory:".to_string()),
            _ => None,
        });

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.security.store_password, "shared");
        assert_eq!(config.general.database_path, "sqlite::memory:");
        assert!(config.security.admin_password.is_empty());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [security]
            token_ttl_hours = 8
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.security.token_ttl_hours, 8);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_generate_secret() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(secret, generate_secret());
    }
}
