//! Client configuration.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskdash_core::CanonicalForm;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "taskdash.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_store")]
    pub store: StoreSettings,

    #[serde(default)]
    pub normalization: NormalizationSettings,

    #[serde(default)]
    pub ids: IdSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreSettings {
    /// Base URL of the REST store (e.g. "http://localhost:3000")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizationSettings {
    #[serde(default)]
    pub canonical_form: CanonicalForm,

    /// Also normalize JSON bodies sent to the store
    #[serde(default = "default_true")]
    pub normalize_requests: bool,
}

/// Who assigns ids to new records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// The store generates ids; none is sent on create
    #[default]
    Server,
    /// The client sends `max(existing) + 1`. Racy with concurrent creators.
    Sequential,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdSettings {
    #[serde(default)]
    pub strategy: IdStrategy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Compare non-bcrypt stored passwords as plaintext
    #[serde(default = "default_true")]
    pub accept_legacy_plaintext: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionSettings {
    /// File holding the persisted session slot; in-memory when unset
    pub path: Option<PathBuf>,
}

impl ClientConfig {
    /// Defaults pointed at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            store: StoreSettings {
                base_url: base_url.into(),
                ..default_store()
            },
            ..Self::default()
        }
    }

    /// Load from `taskdash.toml` (if present) and `TASKDASH_` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load from the given file (if present) and `TASKDASH_` environment variables.
    ///
    /// Nested keys use a double underscore: `TASKDASH_STORE__BASE_URL`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TASKDASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.store.base_url.trim();
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed =
            url::Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ClientError::Config(format!(
                "bcrypt cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            )));
        }

        Ok(())
    }
}

// Default values
fn default_store() -> StoreSettings {
    StoreSettings {
        base_url: default_base_url(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        bcrypt_cost: default_bcrypt_cost(),
        accept_legacy_plaintext: default_true(),
    }
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for NormalizationSettings {
    fn default() -> Self {
        Self {
            canonical_form: CanonicalForm::default(),
            normalize_requests: default_true(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            normalization: NormalizationSettings::default(),
            ids: IdSettings::default(),
            auth: default_auth(),
            session: SessionSettings::default(),
        }
    }
}
