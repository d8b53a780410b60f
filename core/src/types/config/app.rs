use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::StorageKey;

/// User-facing application configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub owner: OwnerConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl AppConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if StorageKey::try_new(self.storage.namespace.clone()).is_err() {
            errors.push("storage.namespace must be a non-empty key".to_string());
        }

        if self.storage.quota_bytes == 0 {
            errors.push("storage.quota_bytes must be at least 1".to_string());
        }

        if self.notifier.timeout_ms == 0 {
            errors.push("notifier.timeout_ms must be at least 1".to_string());
        }

        if self.notifier.enabled && !self.notifier.is_complete() {
            errors.push(
                "notifier is enabled but service_id, template_id or public_key is empty"
                    .to_string(),
            );
        }

        if self.admin.password.is_empty() {
            errors.push("admin.password must not be empty".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            storage: StorageConfig {
                namespace: if StorageKey::try_new(self.storage.namespace.clone()).is_err() {
                    defaults.storage.namespace
                } else {
                    self.storage.namespace.clone()
                },
                quota_bytes: if self.storage.quota_bytes == 0 {
                    defaults.storage.quota_bytes
                } else {
                    self.storage.quota_bytes
                },
                exports_dir: self.storage.exports_dir.clone(),
            },
            notifier: NotifierConfig {
                timeout_ms: if self.notifier.timeout_ms == 0 {
                    defaults.notifier.timeout_ms
                } else {
                    self.notifier.timeout_ms
                },
                ..self.notifier.clone()
            },
            admin: AdminConfig {
                password: if self.admin.password.is_empty() {
                    defaults.admin.password
                } else {
                    self.admin.password.clone()
                },
            },
            owner: self.owner.clone(),
            profile: self.profile.clone(),
        }
    }

    /// Resolved storage key for the message collection.
    pub fn storage_key(&self) -> StorageKey {
        StorageKey::try_new(self.storage.namespace.clone())
            .unwrap_or_else(|_| StorageKey::messages())
    }
}

/// Local message storage settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: u64,
    /// Overrides the directory exported JSON files are written to.
    #[serde(default)]
    pub exports_dir: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            quota_bytes: default_quota_bytes(),
            exports_dir: None,
        }
    }
}

fn default_namespace() -> String {
    StorageKey::MESSAGES.to_string()
}

fn default_quota_bytes() -> u64 {
    5 * 1024 * 1024
}

/// Transactional email settings. The identifiers are public, client-embedded values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
    /// Recipient greeting passed to the template as `to_name`.
    #[serde(default)]
    pub to_name: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl NotifierConfig {
    pub fn is_complete(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            to_name: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Admin panel gate.
///
/// The password is compared in plain text on the client. It hides the panel
/// from casual visitors and is not authentication.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_admin_password(),
        }
    }
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

/// Site owner details shown in failure notifications.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OwnerConfig {
    #[serde(default)]
    pub email: String,
}

/// Where the profile document is read from.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// File path or http(s) URL. Defaults to `profile.json` in the data directory.
    #[serde(default)]
    pub source: Option<String>,
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
