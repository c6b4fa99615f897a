/// Sanitized session record
use super::ids::EntityId;
use super::user::{Role, User};
use serde::{Deserialize, Serialize};

/// The part of a user record that is safe to keep on the client.
/// Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: EntityId,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub active: bool,
}

impl Session {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.canonical(),
            username: user.username.clone(),
            role: user.role,
            active: user.active,
        }
    }
}
