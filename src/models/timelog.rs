use chrono::DateTime;
use serde::Deserialize;

use super::{ValidationError, require, require_one_of};
use crate::domain::Direction;

#[derive(Debug, Clone, Deserialize)]
pub struct TimelogDraft {
    pub store_id: String,
    pub worker_id: String,
    pub direction: String,
    /// RFC 3339; the server clock is used when omitted.
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl TimelogDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.worker_id, "worker_id")?;
        require(&self.store_id, "store_id")?;
        require_one_of(
            &self.direction,
            "direction",
            Direction::ALL,
            Direction::parse(&self.direction).is_some(),
        )?;

        if let Some(ts) = &self.timestamp
            && DateTime::parse_from_rfc3339(ts).is_err()
        {
            return Err(ValidationError::new("timestamp must be an RFC 3339 date-time"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timelog_rules() {
        let mut draft = TimelogDraft {
            store_id: "s-1".to_string(),
            worker_id: "w-1".to_string(),
            direction: "Entry".to_string(),
            timestamp: None,
        };
        assert!(draft.validate().is_ok());

        draft.timestamp = Some("2024-05-01T08:00:00+02:00".to_string());
        assert!(draft.validate().is_ok());

        draft.timestamp = Some("yesterday".to_string());
        assert!(draft.validate().is_err());

        draft.timestamp = None;
        draft.direction = "Entrada".to_string();
        assert!(draft.validate().unwrap_err().0.starts_with("direction"));

        draft.direction = "Exit".to_string();
        draft.store_id = String::new();
        assert_eq!(draft.validate().unwrap_err().0, "store_id is required");
    }
}
