/// Project domain types
use super::ids::EntityId;
use super::today;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status written on new projects unless another is given
pub const DEFAULT_PROJECT_STATUS: &str = "active";

/// Project as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Free-form lifecycle label, `"active"` for new projects
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,

    /// Creation date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub created_at: String,

    /// Member user ids in the order they were added. Not deduplicated.
    #[serde(default)]
    pub members: Vec<EntityId>,

    /// Fields this client does not model, written back unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn has_member(&self, user_id: &EntityId) -> bool {
        self.members.contains(user_id)
    }

    /// Remove `user_id` if it is a member, otherwise append it.
    ///
    /// Returns whether the user is a member afterwards.
    pub fn toggle_member(&mut self, user_id: EntityId) -> bool {
        if self.has_member(&user_id) {
            self.members.retain(|member| member != &user_id);
            false
        } else {
            self.members.push(user_id);
            true
        }
    }
}

/// Data for creating a new project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: String,
    pub created_at: String,
    pub members: Vec<EntityId>,
}

impl NewProject {
    /// A project created today with no members
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status: DEFAULT_PROJECT_STATUS.to_string(),
            created_at: today(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = EntityId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("project name is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        let project: Project = serde_json::from_str(
            r#"{"id":1,"name":"Web","createdAt":"2024-05-01","members":["2",3]}"#,
        )
        .unwrap();
        assert_eq!(project.created_at, "2024-05-01");
        assert_eq!(project.members, vec![EntityId::from(2), EntityId::from(3)]);
        assert!(project.description.is_empty());

        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("description").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = serde_json::json!({
            "id": 1, "name": "Web", "status": "archived", "owner": { "team": "web" }, "members": [2]
        });
        let project: Project = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(project.status, "archived");
        assert_eq!(project.extra["owner"]["team"], "web");

        assert_eq!(serde_json::to_value(&project).unwrap(), raw);
    }

    #[test]
    fn test_toggle_member_across_representations() {
        let mut project = Project {
            id: EntityId::from(1),
            name: "Web".into(),
            description: String::new(),
            status: String::new(),
            created_at: String::new(),
            members: vec![EntityId::from("2"), EntityId::from(5)],
            extra: Map::new(),
        };

        assert!(!project.toggle_member(EntityId::from(2)));
        assert_eq!(project.members, vec![EntityId::from(5)]);

        assert!(project.toggle_member(EntityId::from(9)));
        assert_eq!(project.members, vec![EntityId::from(5), EntityId::from(9)]);
    }

    #[test]
    fn test_new_project_validation() {
        assert!(NewProject::new("Web").validate().is_ok());
        assert!(NewProject::new("   ").validate().is_err());
        assert_eq!(NewProject::new("Web").created_at.len(), 10);
        assert_eq!(NewProject::new("Web").status, DEFAULT_PROJECT_STATUS);
        assert_eq!(NewProject::new("Web").with_status("paused").status, "paused");
    }
}
