mod ids;
mod project;
mod session;
mod task;
mod user;

pub use ids::EntityId;
pub use project::{NewProject, Project, DEFAULT_PROJECT_STATUS};
pub use session::Session;
pub use task::{NewTask, Task, TaskStatus};
pub use user::{NewUser, Role, User};

/// Today's date as stored in `createdAt` fields.
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
