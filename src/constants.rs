pub mod accounts {

    /// Username of the account created at bootstrap when no admin exists.
    pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

    /// Number of leading `nie` characters that form a worker's initial password.
    pub const WORKER_PASSWORD_PREFIX_LEN: usize = 4;

    /// Candidate usernames tried before giving up on a base name.
    pub const MAX_USERNAME_ATTEMPTS: u32 = 10_000;
}

pub mod tokens {

    pub const DEFAULT_TTL_HOURS: i64 = 18;

    pub const BEARER_PREFIX: &str = "Bearer ";
}

pub mod limits {

    pub const PHONE_MIN: i64 = 100_000_000;

    pub const PHONE_MAX: i64 = 999_999_999;
}

pub mod storage {
    use std::time::Duration;

    /// How long a connection waits for the SQLite write lock before failing
    /// with `SQLITE_BUSY`.
    pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
}
