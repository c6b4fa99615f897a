//! Request/response interception.
//!
//! Interceptors sit between [`TaskdashClient`](crate::TaskdashClient) and the
//! store. They are installed once when the client is built and see every
//! exchange; callers never invoke them directly.

use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use taskdash_core::{CanonicalForm, Normalizer};
use tracing::debug;

/// A response from the store, before it is handed to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl StoreResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as lossy UTF-8, for error messages.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Hook applied to traffic between the client and the store.
///
/// Implementations must not fail: anything they cannot handle is passed
/// through unchanged.
pub trait TrafficInterceptor: Send + Sync {
    /// Rewrite an outgoing JSON body.
    fn intercept_request(&self, body: Value) -> Value {
        body
    }

    /// Rewrite an incoming response.
    fn intercept_response(&self, response: StoreResponse) -> StoreResponse {
        response
    }
}

/// Normalizes identifier-shaped fields in both directions.
#[derive(Debug, Clone, Copy)]
pub struct NormalizingInterceptor {
    normalizer: Normalizer,
    normalize_requests: bool,
}

impl NormalizingInterceptor {
    pub fn new(form: CanonicalForm) -> Self {
        Self {
            normalizer: Normalizer::new(form),
            normalize_requests: true,
        }
    }

    /// Only rewrite responses.
    #[must_use]
    pub fn responses_only(mut self) -> Self {
        self.normalize_requests = false;
        self
    }
}

impl TrafficInterceptor for NormalizingInterceptor {
    fn intercept_request(&self, body: Value) -> Value {
        if self.normalize_requests {
            self.normalizer.normalize(&body)
        } else {
            body
        }
    }

    fn intercept_response(&self, response: StoreResponse) -> StoreResponse {
        if response.body.is_empty() {
            return response;
        }

        let parsed: Value = match serde_json::from_slice(&response.body) {
            Ok(value) => value,
            Err(e) => {
                debug!(status = %response.status, error = %e, "Response body is not JSON, passing through");
                return response;
            }
        };

        match serde_json::to_vec(&self.normalizer.normalize(&parsed)) {
            Ok(body) => StoreResponse {
                status: response.status,
                body,
            },
            Err(_) => response,
        }
    }
}

/// Ordered set of interceptors.
///
/// Requests pass through in registration order, responses in reverse, so
/// the first interceptor registered is the outermost.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn TrafficInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interceptor: Arc<dyn TrafficInterceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn apply_request(&self, body: Value) -> Value {
        self.interceptors
            .iter()
            .fold(body, |body, interceptor| interceptor.intercept_request(body))
    }

    pub fn apply_response(&self, response: StoreResponse) -> StoreResponse {
        self.interceptors
            .iter()
            .rev()
            .fold(response, |response, interceptor| {
                interceptor.intercept_response(response)
            })
    }
}

impl fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorChain")
            .field("len", &self.interceptors.len())
            .finish()
    }
}
