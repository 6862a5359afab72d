use serde::Deserialize;

use super::{ValidationError, require, require_one_of};
use crate::constants::accounts::WORKER_PASSWORD_PREFIX_LEN;
use crate::domain::{OnTrial, WorkerStatus};

/// Worker fields supplied by the admin panel, for both creation and update.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkerDraft {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub nie: String,
    pub position: String,
    pub status: String,
    pub on_trial: String,
    /// `None` when the key is absent, so updates leave the assignment alone;
    /// `Some(None)` unassigns the worker.
    #[serde(default, deserialize_with = "super::present")]
    pub store_id: Option<Option<String>>,
}

impl WorkerDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.last_name, "last_name")?;
        require(&self.email, "email")?;
        require(&self.position, "position")?;
        require(&self.nie, "nie")?;

        if self.normalized_nie().chars().count() < WORKER_PASSWORD_PREFIX_LEN {
            return Err(ValidationError(format!(
                "nie must be at least {WORKER_PASSWORD_PREFIX_LEN} characters"
            )));
        }

        require_one_of(
            &self.status,
            "status",
            WorkerStatus::ALL,
            WorkerStatus::parse(&self.status).is_some(),
        )?;
        require_one_of(
            &self.on_trial,
            "on_trial",
            OnTrial::ALL,
            OnTrial::parse(&self.on_trial).is_some(),
        )?;

        Ok(())
    }

    /// The `nie` as stored and compared for uniqueness.
    #[must_use]
    pub fn normalized_nie(&self) -> &str {
        self.nie.trim()
    }

    /// Initial password: the first characters of the `nie`, lowercased.
    #[must_use]
    pub fn initial_password(&self) -> String {
        self.normalized_nie()
            .chars()
            .take(WORKER_PASSWORD_PREFIX_LEN)
            .collect::<String>()
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> WorkerDraft {
        WorkerDraft {
            name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@example.com".to_string(),
            nie: "X1234567Z".to_string(),
            position: "Cashier".to_string(),
            status: "Active".to_string(),
            on_trial: "no".to_string(),
            store_id: None,
        }
    }

    #[test]
    fn test_valid_worker() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_first_failing_rule_is_reported() {
        let mut worker = draft();
        worker.name = String::new();
        worker.status = "Retired".to_string();

        let err = worker.validate().unwrap_err();
        assert_eq!(err.0, "name is required");
    }

    #[test]
    fn test_short_nie_rejected() {
        let mut worker = draft();
        worker.nie = "X12".to_string();
        assert!(worker.validate().unwrap_err().0.contains("nie"));
    }

    #[test]
    fn test_enumerated_fields() {
        let mut worker = draft();
        worker.status = "active".to_string();
        assert!(worker.validate().unwrap_err().0.starts_with("status"));

        let mut worker = draft();
        worker.on_trial = "Si".to_string();
        assert!(worker.validate().unwrap_err().0.starts_with("on_trial"));
    }

    #[test]
    fn test_store_id_presence() {
        let base = r#""name":"John","last_name":"Doe","email":"j@x.com","nie":"X1234567Z","position":"Cashier","status":"Active","on_trial":"no""#;

        let absent: WorkerDraft = serde_json::from_str(&format!("{{{base}}}")).unwrap();
        assert_eq!(absent.store_id, None);

        let null: WorkerDraft =
            serde_json::from_str(&format!(r#"{{{base},"store_id":null}}"#)).unwrap();
        assert_eq!(null.store_id, Some(None));

        let set: WorkerDraft =
            serde_json::from_str(&format!(r#"{{{base},"store_id":"s-1"}}"#)).unwrap();
        assert_eq!(set.store_id, Some(Some("s-1".to_string())));
    }

    #[test]
    fn test_nie_is_trimmed() {
        let mut worker = draft();
        worker.nie = "  X1234567Z ".to_string();
        assert_eq!(worker.normalized_nie(), "X1234567Z");
        assert_eq!(worker.initial_password(), "x123");

        worker.nie = " X12 ".to_string();
        assert!(worker.validate().is_err());
    }

    #[test]
    fn test_initial_password() {
        assert_eq!(draft().initial_password(), "x123");

        let mut worker = draft();
        worker.nie = "ABCD".to_string();
        assert_eq!(worker.initial_password(), "abcd");
    }
}
