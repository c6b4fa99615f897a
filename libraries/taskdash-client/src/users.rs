//! User operations.

use crate::client::TaskdashClient;
use crate::error::Result;
use crate::password::{hash_password, is_hashed};
use crate::repository::Collection;
use taskdash_core::{CoreError, EntityId, NewUser, User};
use tracing::{debug, info};

/// User repository for the Taskdash store.
///
/// Passwords are bcrypt-hashed before they leave the client.
pub struct UserRepository<'a> {
    client: &'a TaskdashClient,
    users: Collection<'a, User>,
}

impl<'a> UserRepository<'a> {
    pub(crate) fn new(client: &'a TaskdashClient) -> Self {
        Self {
            client,
            users: Collection::new(client),
        }
    }

    fn bcrypt_cost(&self) -> u32 {
        self.client.config().auth.bcrypt_cost
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    pub async fn get_by_id(&self, id: &EntityId) -> Result<User> {
        self.users.get_by_id(id).await
    }

    /// Records with exactly this username. Normally zero or one.
    ///
    /// The store filter is re-checked here, so a store that ignores the
    /// query string cannot hand back other accounts.
    pub async fn find_by_username(&self, username: &str) -> Result<Vec<User>> {
        let mut users = self
            .users
            .list_where(&[("username", username.to_string())])
            .await?;
        users.retain(|user| user.username == username);
        Ok(users)
    }

    /// Accounts waiting for a manager to activate them.
    pub async fn list_pending(&self) -> Result<Vec<User>> {
        let mut users = self
            .users
            .list_where(&[("active", "false".to_string())])
            .await?;
        users.retain(|user| !user.active);
        Ok(users)
    }

    /// Create a user. Unless the draft says otherwise the account is an
    /// inactive member.
    pub async fn create(&self, draft: &NewUser) -> Result<User> {
        draft.validate()?;

        let mut record = draft.clone();
        record.password = hash_password(&draft.password, self.bcrypt_cost())?;

        debug!(username = %draft.username, role = %draft.role, active = draft.active, "Creating user");
        self.users.insert(&record).await
    }

    /// Replace a user. A plaintext password in `user` is hashed first.
    pub async fn update(&self, id: &EntityId, user: &User) -> Result<User> {
        if user.username.trim().is_empty() {
            return Err(CoreError::validation("username is required").into());
        }

        if user.password.is_empty() || is_hashed(&user.password) {
            return self.users.replace(id, user).await;
        }

        let mut record = user.clone();
        record.password = hash_password(&user.password, self.bcrypt_cost())?;
        self.users.replace(id, &record).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<()> {
        self.users.remove(id).await
    }

    /// Change only the `active` flag.
    pub async fn set_active(&self, id: &EntityId, active: bool) -> Result<User> {
        let mut user = self.get_by_id(id).await?;
        user.active = active;
        let updated = self.users.replace(id, &user).await?;

        info!(user = %id, active, "Changed account activation");
        Ok(updated)
    }

    /// Change only the password.
    pub async fn set_password(&self, id: &EntityId, password: &str) -> Result<User> {
        if password.is_empty() {
            return Err(CoreError::validation("password is required").into());
        }
        let mut user = self.get_by_id(id).await?;
        user.password = hash_password(password, self.bcrypt_cost())?;
        self.users.replace(id, &user).await
    }
}
