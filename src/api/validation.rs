use super::ApiError;

/// Worker, store and account ids are UUIDs.
pub fn validate_entity_id<'a>(id: &'a str, entity: &str) -> Result<&'a str, ApiError> {
    if uuid::Uuid::parse_str(id).is_err() {
        return Err(ApiError::validation(format!("Invalid {entity} ID: {id}")));
    }
    Ok(id)
}

pub fn validate_holiday_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid holiday ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

pub fn validate_login(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(())
}
