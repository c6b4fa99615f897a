//! Dashboard aggregates computed from fetched records.

use crate::permissions::{can_perform, Action};
use crate::types::{EntityId, Project, Session, Task, TaskStatus, User};
use std::collections::HashMap;

/// Percentage of `tasks` that are completed, rounded. 0 for no tasks.
pub fn project_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    ((done as f64 / tasks.len() as f64) * 100.0).round() as u8
}

/// Task counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut summary, task| {
            match task.status {
                TaskStatus::Pending => summary.pending += 1,
                TaskStatus::InProgress => summary.in_progress += 1,
                TaskStatus::Completed => summary.completed += 1,
            }
            summary
        })
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }
}

/// Projects bucketed by completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressOverview {
    /// Progress per project id
    pub by_project: HashMap<EntityId, u8>,
    pub complete: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl ProgressOverview {
    pub fn from_projects(projects: &[Project], tasks: &[Task]) -> Self {
        let mut overview = Self::default();

        for project in projects {
            let project_tasks: Vec<Task> = tasks
                .iter()
                .filter(|t| t.project_id == project.id)
                .cloned()
                .collect();
            let progress = project_progress(&project_tasks);

            match progress {
                100 => overview.complete += 1,
                0 => overview.not_started += 1,
                _ => overview.in_progress += 1,
            }
            overview.by_project.insert(project.id.clone(), progress);
        }

        overview
    }
}

/// Managers see every task, members only the ones assigned to them.
pub fn visible_tasks<'a>(session: &Session, tasks: &'a [Task]) -> Vec<&'a Task> {
    if can_perform(session, Action::ViewAllTasks) {
        tasks.iter().collect()
    } else {
        tasks
            .iter()
            .filter(|t| t.is_assigned_to(&session.id))
            .collect()
    }
}

/// Usernames of the project's members, in member order. Unknown ids are skipped.
pub fn member_names<'a>(project: &Project, users: &'a [User]) -> Vec<&'a str> {
    project
        .members
        .iter()
        .filter_map(|member| users.iter().find(|u| &u.id == member))
        .map(|u| u.username.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serde_json::Map;

    fn task(id: i64, project_id: EntityId, status: TaskStatus, assigned_to: Option<i64>) -> Task {
        Task {
            id: EntityId::from(id),
            title: format!("task {}", id),
            description: String::new(),
            project_id,
            assigned_to: assigned_to.map(EntityId::from),
            status,
            created_at: String::new(),
            extra: Map::new(),
        }
    }

    fn project(id: i64, members: Vec<EntityId>) -> Project {
        Project {
            id: EntityId::from(id),
            name: format!("project {}", id),
            description: String::new(),
            status: String::new(),
            created_at: String::new(),
            members,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_project_progress() {
        assert_eq!(project_progress(&[]), 0);

        let tasks = vec![
            task(1, EntityId::from(1), TaskStatus::Completed, None),
            task(2, EntityId::from(1), TaskStatus::Pending, None),
            task(3, EntityId::from(1), TaskStatus::InProgress, None),
        ];
        assert_eq!(project_progress(&tasks), 33);
        assert_eq!(project_progress(&tasks[..1]), 100);
    }

    #[test]
    fn test_task_summary() {
        let tasks = vec![
            task(1, EntityId::from(1), TaskStatus::Completed, None),
            task(2, EntityId::from(1), TaskStatus::Pending, None),
            task(3, EntityId::from(1), TaskStatus::Pending, None),
        ];
        let summary = TaskSummary::from_tasks(&tasks);
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.in_progress, 0);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_overview_matches_ids_across_representations() {
        let projects = vec![project(1, vec![]), project(2, vec![]), project(3, vec![])];
        let tasks = vec![
            task(1, EntityId::from("1"), TaskStatus::Completed, None),
            task(2, EntityId::from(2), TaskStatus::Completed, None),
            task(3, EntityId::from("2"), TaskStatus::Pending, None),
        ];

        let overview = ProgressOverview::from_projects(&projects, &tasks);
        assert_eq!(overview.complete, 1);
        assert_eq!(overview.in_progress, 1);
        assert_eq!(overview.not_started, 1);
        assert_eq!(overview.by_project[&EntityId::from(2)], 50);
    }

    #[test]
    fn test_visible_tasks() {
        let tasks = vec![
            task(1, EntityId::from(1), TaskStatus::Pending, Some(7)),
            task(2, EntityId::from(1), TaskStatus::Pending, Some(8)),
            task(3, EntityId::from(1), TaskStatus::Pending, None),
        ];
        let mut session = Session {
            id: EntityId::from("7"),
            username: "ana".into(),
            role: Role::Member,
            active: true,
        };

        let visible = visible_tasks(&session, &tasks);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, EntityId::from(1));

        session.role = Role::Manager;
        assert_eq!(visible_tasks(&session, &tasks).len(), 3);
    }

    #[test]
    fn test_member_names() {
        let users = vec![
            User {
                id: EntityId::from(1),
                username: "ana".into(),
                password: String::new(),
                role: Role::Manager,
                active: true,
                extra: Map::new(),
            },
            User {
                id: EntityId::from("2"),
                username: "luis".into(),
                password: String::new(),
                role: Role::Member,
                active: true,
                extra: Map::new(),
            },
        ];
        let project = project(1, vec![EntityId::from(2), EntityId::from(9), EntityId::from("1")]);
        assert_eq!(member_names(&project, &users), vec!["luis", "ana"]);
    }
}
