/// User domain types
use super::ids::EntityId;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    /// Manager: may edit anything and activate accounts
    #[serde(rename = "gerente")]
    Manager,
    /// Regular member
    #[default]
    #[serde(rename = "usuario")]
    Member,
}

impl Role {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "gerente",
            Role::Member => "usuario",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub username: String,

    /// Bcrypt hash, or plaintext for records written by older clients
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,

    #[serde(default)]
    pub role: Role,

    /// Gates login; new accounts start inactive
    #[serde(default)]
    pub active: bool,

    /// Fields this client does not model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Data for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub active: bool,
}

impl NewUser {
    /// A pending member account
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: Role::default(),
            active: false,
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(CoreError::validation("username is required"));
        }
        if self.password.is_empty() {
            return Err(CoreError::validation("password is required"));
        }
        Ok(())
    }
}
