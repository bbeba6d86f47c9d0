use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::ClientConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API endpoint is required")]
    EndpointRequired,
    #[error("API endpoint must start with http:// or https://")]
    EndpointScheme,
    #[error("API key is required")]
    KeyRequired,
    #[error("Settings load error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persisted console settings. Absent file or absent keys mean "unset";
/// only building a [`ClientConfig`] enforces that endpoint and key are
/// actually present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub api_endpoint: String,
    pub api_key: String,
    pub region: String,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            api_key: String::new(),
            region: "us-east-1".to_string(),
            debug: false,
        }
    }
}

/// Where settings live: `ORDERDESK_SETTINGS` wins, then the usual
/// `~/.config/orderdesk/settings.json`, then the working directory as a
/// last resort on HOME-less environments.
pub fn settings_path() -> PathBuf {
    if let Ok(path) = env::var("ORDERDESK_SETTINGS") {
        return PathBuf::from(path);
    }
    match env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".config")
            .join("orderdesk")
            .join("settings.json"),
        Err(_) => PathBuf::from("orderdesk-settings.json"),
    }
}

impl Settings {
    /// Load from the default location, layered with `ORDERDESK_*`
    /// environment overrides (`ORDERDESK_API_KEY=... orderdesk ...`).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&settings_path())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.to_path_buf()).required(false))
            .add_source(config::Environment::with_prefix("ORDERDESK").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Validate and persist. Parent directories are created as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Remove the settings file, resetting the console to unconfigured.
    pub fn clear(path: &std::path::Path) -> Result<(), ConfigError> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Field-level validation, mirroring what a save must enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_endpoint.is_empty() {
            return Err(ConfigError::EndpointRequired);
        }
        if !self.api_endpoint.starts_with("http://") && !self.api_endpoint.starts_with("https://") {
            return Err(ConfigError::EndpointScheme);
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::KeyRequired);
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        !self.api_endpoint.is_empty() && !self.api_key.is_empty()
    }

    /// Produce the immutable value the API client is built from. This
    /// is the configuration gate: with endpoint or key missing the
    /// caller gets an error here and no client ever exists, so no
    /// network call can be attempted.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        if self.api_endpoint.is_empty() {
            return Err(ConfigError::EndpointRequired);
        }
        if self.api_key.is_empty() {
            return Err(ConfigError::KeyRequired);
        }
        Ok(ClientConfig {
            endpoint: self.api_endpoint.clone(),
            api_key: self.api_key.clone(),
        })
    }
}
