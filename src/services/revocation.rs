//! Logged-out tokens that have not yet expired.
//!
//! The registry is in-process state, so a restart forgets every revocation.
//! Expired entries are dropped by a periodic sweep, but lookups compare
//! against the stored deadline and never rely on the sweep having run.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
pub struct RevocationRegistry {
    entries: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl RevocationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        // The map stays consistent even if a holder panicked.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Revokes `token` until `now + ttl`, replacing any earlier deadline.
    pub fn revoke(&self, token: &str, ttl: Duration) {
        self.lock().insert(token.to_string(), Utc::now() + ttl);
    }

    #[must_use]
    pub fn is_revoked(&self, token: &str) -> bool {
        self.is_revoked_at(token, Utc::now())
    }

    #[must_use]
    pub fn is_revoked_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.lock()
            .get(token)
            .is_some_and(|valid_until| now < *valid_until)
    }

    /// Removes expired entries and returns how many were dropped.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, valid_until| now < *valid_until);
        before - entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Starts the background sweep. It runs for the life of the process.
    pub fn spawn_sweeper(self: &Arc<Self>, period: std::time::Duration) -> JoinHandle<()> {
        let registry = Arc::clone(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let removed = registry.sweep();
                if removed > 0 {
                    debug!(removed, remaining = registry.len(), "Swept expired revocations");
                }
            }
        })
    }
}
