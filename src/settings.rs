use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use config::{Config, Environment, File};

use serde::Deserialize;
use serde_aux::prelude::*;

use url::Url;

use crate::client::NotificationEndpoints;
use crate::domain::EmailAddress;
use crate::repo::{FileStore, InMemoryStore, KeyValueStore};

/// Endpoint used when none is configured. Requests to it are expected to fail.
pub const PLACEHOLDER_ENDPOINT: &str = "https://formspree.io/f/your-form-id";
pub const PLACEHOLDER_ADMIN_EMAIL: &str = "admin@example.com";

/// Runtime environment, either `Dev` for local development, or `Prod` for release
#[derive(Debug)]
pub enum Runtime {
    Dev,
    Prod,
}

impl Runtime {
    pub fn as_str(&self) -> &str {
        match self {
            Runtime::Dev => "dev",
            Runtime::Prod => "prod",
        }
    }
}

impl TryFrom<String> for Runtime {
    type Error = anyhow::Error;

    fn try_from(s: String) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => anyhow::bail!("{} is not a valid runtime environment", other),
        }
    }
}

/// Application settings wrapper
#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: ApplicationSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Settings {
    /// Load application settings from the settings directory
    pub fn load() -> anyhow::Result<Self> {
        let path = env::current_dir()?.join("settings");
        // Get the current environment based on the `APP_ENV` environment variable, default to `Dev`
        let runtime: Runtime = env::var("APP_ENV")
            .unwrap_or_else(|_| "dev".into())
            .try_into()?;

        Self::load_from(runtime, &path)
    }

    /// Load application settings from a specified path and runtime
    pub fn load_from(runtime: Runtime, base_path: &Path) -> anyhow::Result<Self> {
        Config::builder()
            .add_source(File::from(base_path.join("base")).required(true))
            .add_source(File::from(base_path.join(runtime.as_str())).required(true))
            // Takes the form `APP_<settings category>__<setting name>`,
            // e.g. `APP_NOTIFICATIONS__ADMIN_EMAIL`
            .add_source(
                Environment::with_prefix("app")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .context("Failed to load/deserialize settings")
    }
}

#[derive(Debug, Deserialize)]
pub struct ApplicationSettings {
    host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    port: u16,
}

impl ApplicationSettings {
    /// The application address to bind to
    pub fn addr(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

fn placeholder_endpoint() -> String {
    PLACEHOLDER_ENDPOINT.into()
}

fn placeholder_admin_email() -> String {
    PLACEHOLDER_ADMIN_EMAIL.into()
}

/// Form-processing endpoints and the address admin alerts go to
#[derive(Debug, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "placeholder_endpoint")]
    subscription_endpoint: String,
    #[serde(default = "placeholder_endpoint")]
    confirmation_endpoint: String,
    #[serde(default = "placeholder_endpoint")]
    admin_endpoint: String,
    #[serde(default = "placeholder_admin_email")]
    admin_email: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    api_timeout_milliseconds: Option<u64>,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            subscription_endpoint: placeholder_endpoint(),
            confirmation_endpoint: placeholder_endpoint(),
            admin_endpoint: placeholder_endpoint(),
            admin_email: placeholder_admin_email(),
            api_timeout_milliseconds: None,
        }
    }
}

impl NotificationSettings {
    pub fn endpoints(&self) -> anyhow::Result<NotificationEndpoints> {
        let parse = |value: &str, name: &str| {
            Url::parse(value).with_context(|| format!("Failed to parse {} URL", name))
        };

        Ok(NotificationEndpoints {
            subscription: parse(&self.subscription_endpoint, "subscription endpoint")?,
            confirmation: parse(&self.confirmation_endpoint, "confirmation endpoint")?,
            admin: parse(&self.admin_endpoint, "admin endpoint")?,
        })
    }

    pub fn admin_email(&self) -> anyhow::Result<EmailAddress> {
        self.admin_email
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("Failed to parse admin email address")
    }

    /// `None` leaves requests without a client-side timeout
    pub fn api_timeout(&self) -> Option<Duration> {
        self.api_timeout_milliseconds.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

/// Where subscription records are kept
#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    backend: StorageBackend,
    #[serde(default = "default_storage_path")]
    path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data")
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
        }
    }
}

impl StorageSettings {
    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        match self.backend {
            StorageBackend::Memory => Arc::new(InMemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::new(&self.path)),
        }
    }
}
