/// Task domain types
use super::ids::EntityId;
use super::today;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Progress state of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "en progreso")]
    InProgress,
    #[serde(rename = "completada")]
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pendiente",
            TaskStatus::InProgress => "en progreso",
            TaskStatus::Completed => "completada",
        }
    }

    /// Completed tasks reopen as pending; anything else completes.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub project_id: EntityId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<EntityId>,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,

    /// Fields this client does not model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn is_assigned_to(&self, user_id: &EntityId) -> bool {
        self.assigned_to.as_ref() == Some(user_id)
    }
}

/// Data for creating a new task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub project_id: EntityId,
    pub assigned_to: Option<EntityId>,
    pub status: TaskStatus,
    pub created_at: String,
}

impl NewTask {
    /// An unassigned pending task created today
    pub fn new(title: impl Into<String>, project_id: impl Into<EntityId>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            project_id: project_id.into(),
            assigned_to: None,
            status: TaskStatus::default(),
            created_at: today(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn assigned_to(mut self, user_id: impl Into<EntityId>) -> Self {
        self.assigned_to = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("task title is required"));
        }
        Ok(())
    }
}
