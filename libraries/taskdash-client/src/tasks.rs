//! Task operations.

use crate::client::TaskdashClient;
use crate::error::Result;
use crate::repository::Collection;
use taskdash_core::{CoreError, EntityId, NewTask, Task, TaskStatus};
use tracing::debug;

/// Task repository for the Taskdash store.
pub struct TaskRepository<'a> {
    tasks: Collection<'a, Task>,
}

impl<'a> TaskRepository<'a> {
    pub(crate) fn new(client: &'a TaskdashClient) -> Self {
        Self {
            tasks: Collection::new(client),
        }
    }

    pub async fn list(&self) -> Result<Vec<Task>> {
        self.tasks.list().await
    }

    /// Tasks belonging to a project.
    ///
    /// # Arguments
    /// * `project_id` - matched by the store against `projectId`; `7` and `"7"` query the same
    pub async fn list_by_project(&self, project_id: &EntityId) -> Result<Vec<Task>> {
        self.tasks
            .list_where(&[("projectId", project_id.to_path_segment())])
            .await
    }

    /// Tasks assigned to a user.
    pub async fn list_assigned_to(&self, user_id: &EntityId) -> Result<Vec<Task>> {
        self.tasks
            .list_where(&[("assignedTo", user_id.to_path_segment())])
            .await
    }

    pub async fn get_by_id(&self, id: &EntityId) -> Result<Task> {
        self.tasks.get_by_id(id).await
    }

    /// Create a task. The title must not be blank.
    pub async fn create(&self, draft: &NewTask) -> Result<Task> {
        draft.validate()?;
        debug!(title = %draft.title, project = %draft.project_id, "Creating task");
        self.tasks.insert(draft).await
    }

    /// Replace a task. The title must not be blank.
    pub async fn update(&self, id: &EntityId, task: &Task) -> Result<Task> {
        if task.title.trim().is_empty() {
            return Err(CoreError::validation("task title is required").into());
        }
        self.tasks.replace(id, task).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.tasks.remove(id).await
    }

    /// Change only the status, keeping every other field.
    pub async fn set_status(&self, id: &EntityId, status: TaskStatus) -> Result<Task> {
        let mut task = self.get_by_id(id).await?;
        task.status = status;
        self.update(id, &task).await
    }

    /// Complete an open task, or reopen a completed one.
    pub async fn toggle_completion(&self, id: &EntityId) -> Result<Task> {
        let mut task = self.get_by_id(id).await?;
        task.status = task.status.toggled();
        debug!(task = %id, status = %task.status, "Toggled task completion");
        self.update(id, &task).await
    }
}
