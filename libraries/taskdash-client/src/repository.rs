//! Generic CRUD over one store collection.

use crate::client::{decode, status_error, TaskdashClient};
use crate::config::IdStrategy;
use crate::error::{ClientError, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use taskdash_core::{EntityId, Project, Task, User};
use tracing::{debug, info};

/// A record type stored in its own collection.
pub trait Entity: Serialize + DeserializeOwned {
    /// Collection path, e.g. `projects`
    const RESOURCE: &'static str;
    /// Name used in error messages
    const NAME: &'static str;

    fn id(&self) -> &EntityId;
}

impl Entity for Project {
    const RESOURCE: &'static str = "projects";
    const NAME: &'static str = "Project";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Entity for Task {
    const RESOURCE: &'static str = "tasks";
    const NAME: &'static str = "Task";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Entity for User {
    const RESOURCE: &'static str = "users";
    const NAME: &'static str = "User";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// CRUD operations on the collection holding `T`.
///
/// Responses are already normalized by the client's interceptor; nothing
/// here coerces identifiers again.
pub struct Collection<'a, T> {
    client: &'a TaskdashClient,
    _entity: PhantomData<T>,
}

impl<'a, T: Entity> Collection<'a, T> {
    pub(crate) fn new(client: &'a TaskdashClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn item_path(id: &EntityId) -> String {
        format!("{}/{}", T::RESOURCE, id.to_path_segment())
    }

    /// Every record in the collection.
    pub async fn list(&self) -> Result<Vec<T>> {
        self.list_where(&[]).await
    }

    /// Records matching all `filters` (query-string equality).
    pub async fn list_where(&self, filters: &[(&str, String)]) -> Result<Vec<T>> {
        let response = self.client.get(T::RESOURCE, filters).await?;
        let records: Vec<T> = decode(&response, T::RESOURCE)?;

        debug!(
            resource = T::RESOURCE,
            filters = ?filters,
            count = records.len(),
            "Listed records"
        );

        Ok(records)
    }

    pub async fn get_by_id(&self, id: &EntityId) -> Result<T> {
        let response = self.client.get(&Self::item_path(id), &[]).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(T::NAME, id));
        }
        decode(&response, T::NAME)
    }

    /// Create a record from `draft`.
    ///
    /// With [`IdStrategy::Sequential`] the id is `max(existing) + 1`, read
    /// from a full listing just before the write. Two clients creating at
    /// the same time can pick the same id.
    pub async fn insert<D: Serialize>(&self, draft: &D) -> Result<T> {
        let mut body = serde_json::to_value(draft)
            .map_err(|e| ClientError::ParseError(format!("Failed to encode {}: {}", T::NAME, e)))?;

        if self.client.config().ids.strategy == IdStrategy::Sequential {
            let next = self.next_sequential_id().await?;
            if let Value::Object(fields) = &mut body {
                fields.insert("id".to_string(), Value::from(next));
            }
        }

        let response = self.client.post(T::RESOURCE, &body).await?;
        let created: T = decode(&response, T::NAME)?;

        info!(resource = T::RESOURCE, id = %created.id(), "Created record");
        Ok(created)
    }

    /// Replace the record stored under `id`.
    pub async fn replace(&self, id: &EntityId, record: &T) -> Result<T> {
        let response = self.client.put(&Self::item_path(id), record).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(T::NAME, id));
        }
        let updated: T = decode(&response, T::NAME)?;

        debug!(resource = T::RESOURCE, id = %id, "Updated record");
        Ok(updated)
    }

    pub async fn remove(&self, id: &EntityId) -> Result<()> {
        let response = self.client.delete(&Self::item_path(id)).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Err(ClientError::not_found(T::NAME, id));
        }
        if !response.status.is_success() {
            return Err(status_error(&response));
        }

        info!(resource = T::RESOURCE, id = %id, "Deleted record");
        Ok(())
    }

    /// Next id for a client-assigned sequence; non-numeric ids are ignored.
    pub async fn next_sequential_id(&self) -> Result<i64> {
        let max = self
            .list()
            .await?
            .iter()
            .filter_map(|record| record.id().as_i64())
            .max()
            .unwrap_or(0);
        max.checked_add(1).ok_or_else(|| {
            ClientError::Validation(format!(
                "{} ids are exhausted; the largest existing id is {}",
                T::RESOURCE, max
            ))
        })
    }
}
