//! Taskdash Core
//!
//! Platform-agnostic domain types, identifier normalization and role policy
//! for Taskdash, a project/task dashboard backed by a REST store.
//!
//! This crate has no network dependency; `taskdash-client` builds on it.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Project`, `Task` and the `EntityId` they share
//! - **Normalization**: rewriting identifier-shaped JSON fields into one canonical form
//! - **Permissions**: a single `can_perform` check instead of scattered role comparisons
//! - **Stats**: progress and status aggregates for dashboard views
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use taskdash_core::normalize::{normalize, CanonicalForm};
//! use taskdash_core::EntityId;
//!
//! let raw = json!({ "id": "7", "name": "123", "members": ["1", 2, "abc"] });
//! let clean = normalize(&raw, CanonicalForm::Number);
//! assert_eq!(clean, json!({ "id": 7, "name": "123", "members": [1, 2, "abc"] }));
//!
//! assert_eq!(EntityId::from("7"), EntityId::from(7));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod normalize;
pub mod permissions;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use normalize::{CanonicalForm, Normalizer};
pub use permissions::{can_perform, can_update_task_status, require, Action};
pub use types::{
    EntityId, NewProject, NewTask, NewUser, Project, Role, Session, Task, TaskStatus, User,
    DEFAULT_PROJECT_STATUS,
};
