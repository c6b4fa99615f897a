//! Project operations.

use crate::client::TaskdashClient;
use crate::error::Result;
use crate::repository::Collection;
use taskdash_core::{CoreError, EntityId, NewProject, Project};
use tracing::debug;

/// Project repository for the Taskdash store.
pub struct ProjectRepository<'a> {
    projects: Collection<'a, Project>,
}

impl<'a> ProjectRepository<'a> {
    pub(crate) fn new(client: &'a TaskdashClient) -> Self {
        Self {
            projects: Collection::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<Project>> {
        self.projects.list().await
    }

    pub async fn get_by_id(&self, id: &EntityId) -> Result<Project> {
        self.projects.get_by_id(id).await
    }

    /// Create a project. The name must not be blank.
    pub async fn create(&self, draft: &NewProject) -> Result<Project> {
        draft.validate()?;
        debug!(name = %draft.name, members = draft.members.len(), "Creating project");
        self.projects.insert(draft).await
    }

    /// Replace a project. The name must not be blank.
    pub async fn update(&self, id: &EntityId, project: &Project) -> Result<Project> {
        if project.name.trim().is_empty() {
            return Err(CoreError::validation("project name is required").into());
        }
        self.projects.replace(id, project).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.projects.remove(id).await
    }

    /// Add `user_id` to the project's members, or remove it if present.
    pub async fn toggle_member(&self, id: &EntityId, user_id: EntityId) -> Result<Project> {
        let mut project = self.get_by_id(id).await?;
        let is_member = project.toggle_member(user_id.clone());
        debug!(project = %id, user = %user_id, is_member, "Toggled project member");
        self.update(id, &project).await
    }
}
