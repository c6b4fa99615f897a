//! Taskdash Client
//!
//! HTTP client library for the Taskdash REST store.
//!
//! # Features
//!
//! - **Normalization**: every response is rewritten so identifiers share one canonical form
//! - **Repositories**: CRUD for projects, tasks and users
//! - **Authentication**: login, registration and manager-gated account activation
//! - **Sessions**: the signed-in user persisted in a key-value slot
//!
//! # Example
//!
//! ```ignore
//! use taskdash_client::{AuthService, ClientConfig, SessionContext, TaskdashClient};
//! use taskdash_core::NewTask;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load()?;
//!     let client = TaskdashClient::new(config.clone())?;
//!     let auth = AuthService::new(
//!         client.clone(),
//!         SessionContext::from_path(config.session.path.as_deref()),
//!     );
//!
//!     let me = auth.login("ana", "secret").await?;
//!     println!("Logged in as {} ({})", me.username, me.role);
//!
//!     // "7" and 7 name the same project
//!     client.tasks().create(&NewTask::new("Write docs", "7")).await?;
//!     let tasks = client.tasks().list_by_project(&7.into()).await?;
//!     println!("Project 7 has {} tasks", tasks.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod interceptor;
mod password;
mod projects;
mod repository;
mod session;
mod tasks;
mod users;

// Re-export main types
pub use client::TaskdashClient;
pub use config::{
    AuthSettings, ClientConfig, IdSettings, IdStrategy, NormalizationSettings, SessionSettings,
    StoreSettings, DEFAULT_CONFIG_FILE,
};
pub use error::{ClientError, Result};
pub use interceptor::{InterceptorChain, NormalizingInterceptor, StoreResponse, TrafficInterceptor};
pub use session::{FileSessionStore, MemorySessionStore, SessionContext, SessionStore, SESSION_SLOT};

// Re-export repositories for direct use if needed
pub use auth::AuthService;
pub use projects::ProjectRepository;
pub use repository::{Collection, Entity};
pub use tasks::TaskRepository;
pub use users::UserRepository;
