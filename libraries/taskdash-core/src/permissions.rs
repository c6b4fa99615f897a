//! Role policy.
//!
//! Every "is this user a manager?" decision goes through [`can_perform`] so
//! the policy lives in one place.

use crate::error::{CoreError, Result};
use crate::types::{Role, Session, Task};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    CreateProject,
    EditProject,
    DeleteProject,
    CreateTask,
    EditTask,
    DeleteTask,
    /// See tasks assigned to other users
    ViewAllTasks,
    CreateUser,
    EditUser,
    DeleteUser,
    ActivateUser,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::CreateProject,
        Action::EditProject,
        Action::DeleteProject,
        Action::CreateTask,
        Action::EditTask,
        Action::DeleteTask,
        Action::ViewAllTasks,
        Action::CreateUser,
        Action::EditUser,
        Action::DeleteUser,
        Action::ActivateUser,
    ];

    fn description(self) -> &'static str {
        match self {
            Action::CreateProject => "create project",
            Action::EditProject => "edit project",
            Action::DeleteProject => "delete project",
            Action::CreateTask => "create task",
            Action::EditTask => "edit task",
            Action::DeleteTask => "delete task",
            Action::ViewAllTasks => "view all tasks",
            Action::CreateUser => "create user",
            Action::EditUser => "edit user",
            Action::DeleteUser => "delete user",
            Action::ActivateUser => "activate user",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Whether `session` may perform `action`.
///
/// Inactive sessions may do nothing. Managers may do everything listed in
/// [`Action`]; members may do none of it.
pub fn can_perform(session: &Session, action: Action) -> bool {
    if !session.active {
        return false;
    }
    match (session.role, action) {
        (Role::Manager, _) => true,
        (Role::Member, _) => false,
    }
}

/// Like [`can_perform`] but as a `Result`.
pub fn require(session: &Session, action: Action) -> Result<()> {
    if can_perform(session, action) {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied { action })
    }
}

/// Managers may change any task's status; members only their own.
pub fn can_update_task_status(session: &Session, task: &Task) -> bool {
    session.active && (session.is_manager() || task.is_assigned_to(&session.id))
}
