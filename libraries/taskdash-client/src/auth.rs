//! Authentication and account activation.

use crate::client::TaskdashClient;
use crate::error::{ClientError, Result};
use crate::password::verify_password;
use crate::session::SessionContext;
use taskdash_core::{Action, CoreError, EntityId, NewUser, Role, Session, User};
use tracing::{debug, info, warn};

/// Authentication service for the Taskdash store.
///
/// Credentials live in the `users` collection. The service looks accounts
/// up by username, checks the password on the client, and records the
/// signed-in user in the [`SessionContext`] it was given.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: TaskdashClient,
    session: SessionContext,
}

impl AuthService {
    pub fn new(client: TaskdashClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    pub fn client(&self) -> &TaskdashClient {
        &self.client
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Currently signed-in user, if any.
    pub async fn current_user(&self) -> Option<Session> {
        self.session.current().await
    }

    /// Login with username and password.
    ///
    /// An account that has not been activated is rejected with
    /// `AccountNotActive` whether or not the password is right.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(CoreError::validation("username and password are required").into());
        }

        debug!(username = %username, "Attempting login");

        let candidates = self.client.users().find_by_username(username).await?;
        if candidates.is_empty() {
            warn!(username = %username, "Login failed: unknown username");
            return Err(ClientError::InvalidCredentials);
        }

        if candidates.iter().all(|user| !user.active) {
            warn!(username = %username, "Login failed: account not active");
            return Err(ClientError::AccountNotActive);
        }

        let accept_plaintext = self.client.config().auth.accept_legacy_plaintext;
        let Some(user) = candidates
            .iter()
            .filter(|user| user.active)
            .find(|user| verify_password(password, &user.password, accept_plaintext))
        else {
            warn!(username = %username, "Login failed: invalid credentials");
            return Err(ClientError::InvalidCredentials);
        };

        let session = Session::from(user);
        self.session.set(session.clone()).await?;

        info!(username = %session.username, user_id = %session.id, role = %session.role, "Login successful");
        Ok(session)
    }

    /// Register a new account.
    ///
    /// The account starts inactive, so no session is established; a manager
    /// has to activate it before it can log in. The username check and the
    /// insert are two separate requests, so two simultaneous registrations
    /// of the same name can both succeed.
    pub async fn register(&self, username: &str, password: &str, role: Role) -> Result<Session> {
        let draft = NewUser::new(username, password).with_role(role);
        draft.validate()?;

        let users = self.client.users();
        if !users.find_by_username(username).await?.is_empty() {
            warn!(username = %username, "Registration rejected: username taken");
            return Err(ClientError::DuplicateUsername(username.to_string()));
        }

        let created = users.create(&draft).await?;

        info!(username = %created.username, user_id = %created.id, "Registered account pending activation");
        Ok(Session::from(&created))
    }

    /// Forget the current session.
    pub async fn logout(&self) -> Result<()> {
        if let Some(session) = self.session.current().await {
            info!(username = %session.username, "Logged out");
        }
        self.session.clear().await
    }

    /// Accounts waiting for activation. Managers only.
    pub async fn pending_users(&self) -> Result<Vec<User>> {
        self.session.require(Action::ActivateUser).await?;
        self.client.users().list_pending().await
    }

    /// Allow an account to log in. Managers only.
    pub async fn activate_user(&self, id: &EntityId) -> Result<User> {
        self.set_activation(id, true).await
    }

    /// Return an account to pending. Managers only.
    pub async fn deactivate_user(&self, id: &EntityId) -> Result<User> {
        self.set_activation(id, false).await
    }

    async fn set_activation(&self, id: &EntityId, active: bool) -> Result<User> {
        let manager = self.session.require(Action::ActivateUser).await?;
        debug!(manager = %manager.username, user = %id, active, "Changing activation");
        self.client.users().set_active(id, active).await
    }
}
