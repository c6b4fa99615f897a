//! Common test utilities and fixtures
#![allow(dead_code)]

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use taskdash_client::{AuthService, ClientConfig, SessionContext, TaskdashClient};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// In-memory REST store with json-server semantics.
///
/// Records are kept exactly as sent, so a client that posts `"7"` finds
/// `"7"` stored. Generated ids are numeric strings, which is what the
/// normalizing interceptor has to clean up. Query filters compare the
/// string rendering of top-level fields.
#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    collections: HashMap<String, Vec<Value>>,
    next_id: u64,
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn id_of(record: &Value) -> Option<String> {
    record.get("id").map(render)
}

fn json_response(status: u16, body: &Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

impl FakeStore {
    /// Start a mock server answering every request from a fresh store.
    pub async fn start() -> (MockServer, FakeStore) {
        let server = MockServer::start().await;
        let store = FakeStore::default();
        Mock::given(any())
            .respond_with(store.clone())
            .mount(&server)
            .await;
        (server, store)
    }

    /// Insert records as-is.
    pub fn seed(&self, resource: &str, records: Vec<Value>) {
        let mut state = self.state.lock().unwrap();
        for record in &records {
            if let Some(n) = record.get("id").and_then(|id| render(id).parse::<u64>().ok()) {
                state.next_id = state.next_id.max(n);
            }
        }
        state
            .collections
            .entry(resource.to_string())
            .or_default()
            .extend(records);
    }

    /// Raw records currently stored.
    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .collections
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }

    fn handle(&self, method: &str, segments: &[&str], query: &[(String, String)], body: &[u8]) -> ResponseTemplate {
        let mut state = self.state.lock().unwrap();
        let Some(resource) = segments.first().map(|s| s.to_string()) else {
            return json_response(404, &Value::Object(Map::new()));
        };
        let item_id = segments.get(1).map(|s| s.to_string());

        match (method, item_id) {
            ("GET", None) => {
                let records = state.collections.get(&resource).cloned().unwrap_or_default();
                let matching: Vec<Value> = records
                    .into_iter()
                    .filter(|record| {
                        query
                            .iter()
                            .all(|(key, expected)| record.get(key).map(render).as_deref() == Some(expected.as_str()))
                    })
                    .collect();
                json_response(200, &Value::Array(matching))
            }
            ("GET", Some(id)) => {
                let found = state
                    .collections
                    .get(&resource)
                    .and_then(|records| records.iter().find(|r| id_of(r).as_deref() == Some(id.as_str())))
                    .cloned();
                match found {
                    Some(record) => json_response(200, &record),
                    None => json_response(404, &Value::Object(Map::new())),
                }
            }
            ("POST", None) => {
                let Ok(Value::Object(mut record)) = serde_json::from_slice::<Value>(body) else {
                    return ResponseTemplate::new(400).set_body_string("expected a JSON object");
                };
                if !record.contains_key("id") {
                    state.next_id += 1;
                    record.insert("id".into(), Value::String(state.next_id.to_string()));
                }
                let record = Value::Object(record);
                state
                    .collections
                    .entry(resource)
                    .or_default()
                    .push(record.clone());
                json_response(201, &record)
            }
            ("PUT", Some(id)) => {
                let Ok(Value::Object(mut record)) = serde_json::from_slice::<Value>(body) else {
                    return ResponseTemplate::new(400).set_body_string("expected a JSON object");
                };
                let records = state.collections.entry(resource).or_default();
                match records.iter_mut().find(|r| id_of(r).as_deref() == Some(id.as_str())) {
                    Some(existing) => {
                        if let Some(original_id) = existing.get("id").cloned() {
                            record.insert("id".into(), original_id);
                        }
                        *existing = Value::Object(record);
                        json_response(200, existing)
                    }
                    None => json_response(404, &Value::Object(Map::new())),
                }
            }
            ("DELETE", Some(id)) => {
                let records = state.collections.entry(resource).or_default();
                let before = records.len();
                records.retain(|r| id_of(r).as_deref() != Some(id.as_str()));
                if records.len() < before {
                    json_response(200, &Value::Object(Map::new()))
                } else {
                    json_response(404, &Value::Object(Map::new()))
                }
            }
            _ => ResponseTemplate::new(405),
        }
    }
}

impl Respond for FakeStore {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let method = request.method.to_string();
        let segments: Vec<&str> = request
            .url
            .path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let query: Vec<(String, String)> = request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        self.handle(&method.to_uppercase(), &segments, &query, &request.body)
    }
}

/// Client config for tests: cheap bcrypt so hashing does not dominate.
pub fn test_config(uri: &str) -> ClientConfig {
    let mut config = ClientConfig::new(uri);
    config.auth.bcrypt_cost = 4;
    config
}

pub fn test_client(uri: &str) -> TaskdashClient {
    TaskdashClient::new(test_config(uri)).expect("valid test config")
}

pub fn test_auth(client: &TaskdashClient) -> AuthService {
    AuthService::new(client.clone(), SessionContext::in_memory())
}

/// Test user credentials
pub mod fixtures {
    pub const MANAGER_USERNAME: &str = "gerente1";
    pub const MANAGER_PASSWORD: &str = "ManagerPassword456!";

    pub const MEMBER_USERNAME: &str = "alice";
    pub const MEMBER_PASSWORD: &str = "TestPassword123!";
}
