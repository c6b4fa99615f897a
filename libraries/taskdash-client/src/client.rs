//! Main Taskdash store client.

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::interceptor::{InterceptorChain, NormalizingInterceptor, StoreResponse, TrafficInterceptor};
use crate::projects::ProjectRepository;
use crate::tasks::TaskRepository;
use crate::users::UserRepository;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Client for the Taskdash REST store.
///
/// Owns the one shared HTTP client. The identifier-normalizing interceptor
/// is installed when the client is built, so every response that reaches a
/// repository has already been normalized.
///
/// # Example
///
/// ```ignore
/// use taskdash_client::{ClientConfig, TaskdashClient};
///
/// let client = TaskdashClient::new(ClientConfig::new("http://localhost:3000"))?;
///
/// for project in client.projects().list().await? {
///     println!("{} ({} members)", project.name, project.members.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TaskdashClient {
    http: Client,
    base_url: String,
    config: ClientConfig,
    interceptors: InterceptorChain,
}

impl TaskdashClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_interceptors(config, Vec::new())
    }

    /// Create a client with extra interceptors.
    ///
    /// The normalizing interceptor is always registered first, so extra
    /// interceptors see normalized responses.
    pub fn with_interceptors(
        config: ClientConfig,
        extra: Vec<Arc<dyn TrafficInterceptor>>,
    ) -> Result<Self> {
        config.validate()?;

        let base_url = config.store.base_url.trim().trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.store.timeout_secs))
            .connect_timeout(Duration::from_secs(config.store.connect_timeout_secs))
            .user_agent(format!("Taskdash/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut normalizing = NormalizingInterceptor::new(config.normalization.canonical_form);
        if !config.normalization.normalize_requests {
            normalizing = normalizing.responses_only();
        }

        let mut interceptors = InterceptorChain::new();
        interceptors.push(Arc::new(normalizing));
        for interceptor in extra {
            interceptors.push(interceptor);
        }

        debug!(
            base_url = %base_url,
            canonical_form = ?config.normalization.canonical_form,
            interceptors = interceptors.len(),
            "Created store client"
        );

        Ok(Self {
            http,
            base_url,
            config,
            interceptors,
        })
    }

    /// Get the store URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn interceptors(&self) -> &InterceptorChain {
        &self.interceptors
    }

    /// Project operations
    pub fn projects(&self) -> ProjectRepository<'_> {
        ProjectRepository::new(self)
    }

    /// Task operations
    pub fn tasks(&self) -> TaskRepository<'_> {
        TaskRepository::new(self)
    }

    /// User operations
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<StoreResponse> {
        let url = self.url(path);
        debug!(url = %url, query = ?query, "GET");
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(request).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<StoreResponse> {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let body = self.outgoing(body)?;
        self.send(self.http.post(&url).json(&body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<StoreResponse> {
        let url = self.url(path);
        debug!(url = %url, "PUT");
        let body = self.outgoing(body)?;
        self.send(self.http.put(&url).json(&body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<StoreResponse> {
        let url = self.url(path);
        debug!(url = %url, "DELETE");
        self.send(self.http.delete(&url)).await
    }

    fn outgoing<B: Serialize + ?Sized>(&self, body: &B) -> Result<serde_json::Value> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::ParseError(format!("Failed to encode request body: {}", e)))?;
        Ok(self.interceptors.apply_request(value))
    }

    async fn send(&self, request: RequestBuilder) -> Result<StoreResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        debug!(status = %status, bytes = body.len(), "Store responded");

        Ok(self
            .interceptors
            .apply_response(StoreResponse::new(status, body.to_vec())))
    }
}

/// Decode a successful response, or classify the failure.
pub(crate) fn decode<T: DeserializeOwned>(response: &StoreResponse, what: &str) -> Result<T> {
    if !response.status.is_success() {
        return Err(status_error(response));
    }
    serde_json::from_slice(&response.body)
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {}: {}", what, e)))
}

/// Error for a non-success response. 5xx counts as a network failure.
pub(crate) fn status_error(response: &StoreResponse) -> ClientError {
    let status = response.status;
    if status.is_server_error() {
        ClientError::Network(format!("store returned {}: {}", status, response.text()))
    } else {
        ClientError::ServerError {
            status: status.as_u16(),
            message: response.text(),
        }
    }
}
