use serde::Deserialize;

use super::{ValidationError, require};
use crate::constants::limits::{PHONE_MAX, PHONE_MIN};

#[derive(Debug, Clone, Deserialize)]
pub struct StoreDraft {
    pub name: String,
    pub city: String,
    pub phone: i64,
    pub status: String,
}

impl StoreDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        require(&self.city, "city")?;

        if !(PHONE_MIN..=PHONE_MAX).contains(&self.phone) {
            return Err(ValidationError::new("phone must be a 9-digit number"));
        }

        require(&self.status, "status")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> StoreDraft {
        StoreDraft {
            name: "Centro".to_string(),
            city: "Madrid".to_string(),
            phone: 612_345_678,
            status: "Open".to_string(),
        }
    }

    #[test]
    fn test_valid_store() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_phone_bounds() {
        let mut store = draft();
        store.phone = 100_000_000;
        assert!(store.validate().is_ok());
        store.phone = 999_999_999;
        assert!(store.validate().is_ok());
        store.phone = 99_999_999;
        assert!(store.validate().is_err());
        store.phone = 1_000_000_000;
        assert!(store.validate().is_err());
    }

    #[test]
    fn test_required_fields() {
        let mut store = draft();
        store.city = "   ".to_string();
        assert_eq!(store.validate().unwrap_err().0, "city is required");
    }
}
