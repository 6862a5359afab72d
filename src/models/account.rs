use serde::Serialize;

use crate::entities::users;

/// Account as exposed outside the repository layer; the hash never leaves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub username: String,
    pub role: String,
    pub created_at: String,
}

impl From<users::Model> for Account {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            role: model.role,
            created_at: model.created_at,
        }
    }
}
