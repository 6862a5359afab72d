//! Inbound drafts with their field rules, and the outward projections that
//! are not plain entity rows.

pub mod account;
pub mod holiday;
pub mod store;
pub mod timelog;
pub mod worker;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub use account::Account;
pub use holiday::{HolidayDraft, HolidayWithWorker};
pub use store::StoreDraft;
pub use timelog::TimelogDraft;
pub use worker::WorkerDraft;

/// A single unmet field rule. The message names the rule that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// For `Option<Option<T>>` fields with `#[serde(default)]`: an absent key
/// stays `None`, an explicit `null` becomes `Some(None)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn require(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError(format!("{field} is required")));
    }
    Ok(())
}

pub(crate) fn require_one_of(
    value: &str,
    field: &str,
    allowed: &[&str],
    is_valid: bool,
) -> Result<(), ValidationError> {
    if !is_valid {
        return Err(ValidationError(format!(
            "{field} must be one of: {} (got '{value}')",
            allowed.join(", ")
        )));
    }
    Ok(())
}
