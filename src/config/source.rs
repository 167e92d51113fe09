//! Engine settings: enablement, cache TTL, platform mapping, fallback
//! policy, and remote-store credentials.
//!
//! Settings come from two places, mirroring the deployment layout this
//! engine serves: a YAML file for operational knobs and the process
//! environment (optionally primed from a `.env` file) for connection
//! secrets. A missing or unreadable file yields safe defaults with the
//! feature disabled rather than an error.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::base::secret::Secret;
use crate::store::client::StoreCredentials;

pub const ENV_SERVER_URL: &str = "COOKIECLOUD_SERVER_URL";
pub const ENV_UUID: &str = "COOKIECLOUD_UUID";
pub const ENV_PASSWORD: &str = "COOKIECLOUD_PASSWORD";
pub const ENV_CACHE_TTL: &str = "COOKIECLOUD_CACHE_TTL";

const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// The engine's resolved settings.
///
/// The platform mapping is loaded once and read-only for the lifetime of the
/// process; a platform absent from it can never produce a cache entry or a
/// config write through the batch paths.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub enabled: bool,
    pub cache_ttl_seconds: u64,
    pub domain_mapping: BTreeMap<String, String>,
    pub fallback_enabled: bool,
    pub credentials: Option<StoreCredentials>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            enabled: false,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            domain_mapping: BTreeMap::new(),
            fallback_enabled: true,
            credentials: None,
        }
    }
}

/// On-disk shape of the engine's section in the deployment config file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(rename = "CookieCloud", default)]
    cookie_cloud: CookieCloudSection,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CookieCloudSection {
    #[serde(rename = "Enable")]
    enable: bool,
    #[serde(rename = "Cache_TTL")]
    cache_ttl: u64,
    #[serde(rename = "Domain_Mapping")]
    domain_mapping: BTreeMap<String, String>,
    #[serde(rename = "Fallback_Enabled")]
    fallback_enabled: bool,
}

impl Default for CookieCloudSection {
    fn default() -> Self {
        CookieCloudSection {
            enable: false,
            cache_ttl: DEFAULT_CACHE_TTL_SECONDS,
            domain_mapping: BTreeMap::new(),
            fallback_enabled: true,
        }
    }
}

impl SyncSettings {
    /// Load settings from the given YAML file and the process environment.
    ///
    /// File problems are logged and replaced with defaults (feature
    /// disabled), matching the contract that nothing here is fatal. When the
    /// feature is enabled but the environment holds no complete credentials,
    /// the feature is disabled with a warning.
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Self {
        let path = config_path.as_ref();
        let mut settings = match std::fs::read_to_string(path) {
            Ok(text) => match Self::from_yaml_str(&text) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    SyncSettings::default()
                }
            },
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to read config, using defaults");
                SyncSettings::default()
            }
        };
        settings.apply_env(|key| std::env::var(key).ok());
        settings
    }

    /// Parse the YAML portion only; environment not consulted.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        let file: FileConfig = serde_yaml::from_str(text)?;
        let section = file.cookie_cloud;
        Ok(SyncSettings {
            enabled: section.enable,
            cache_ttl_seconds: section.cache_ttl,
            domain_mapping: section.domain_mapping,
            fallback_enabled: section.fallback_enabled,
            credentials: None,
        })
    }

    /// Prime the process environment from a `.env` file if one exists.
    pub fn prime_env_from_file(env_path: impl AsRef<Path>) {
        if let Err(e) = dotenvy::from_path(env_path.as_ref()) {
            tracing::debug!(path = %env_path.as_ref().display(), error = %e, "no .env file loaded");
        }
    }

    /// Pull credentials and overrides out of an environment-like lookup.
    ///
    /// `COOKIECLOUD_CACHE_TTL` overrides the file TTL when it parses; an
    /// unparsable value is logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw_ttl) = lookup(ENV_CACHE_TTL) {
            match raw_ttl.parse::<u64>() {
                Ok(ttl) => self.cache_ttl_seconds = ttl,
                Err(_) => {
                    tracing::warn!(value = %raw_ttl, "invalid cache TTL override, ignoring")
                }
            }
        }

        let server_url = lookup(ENV_SERVER_URL).unwrap_or_default();
        let uuid = lookup(ENV_UUID).unwrap_or_default();
        let password = lookup(ENV_PASSWORD).unwrap_or_default();

        if !server_url.is_empty() && !uuid.is_empty() && !password.is_empty() {
            match Url::parse(&server_url) {
                Ok(url) => {
                    self.credentials = Some(StoreCredentials::new(url, uuid, Secret::new(password)));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "invalid remote store URL, credentials ignored");
                }
            }
        }

        if self.enabled && self.credentials.is_none() {
            tracing::warn!("remote store credentials incomplete, disabling cookie sync");
            self.enabled = false;
        }
    }

    /// Non-sensitive view for the administrative surface.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            enabled: self.enabled,
            cache_ttl_seconds: self.cache_ttl_seconds,
            domain_mapping: self.domain_mapping.clone(),
            fallback_enabled: self.fallback_enabled,
            server_configured: self.credentials.is_some(),
        }
    }
}

/// Configuration info safe to expose upward; holds no secrets.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub enabled: bool,
    pub cache_ttl_seconds: u64,
    pub domain_mapping: BTreeMap<String, String>,
    pub fallback_enabled: bool,
    pub server_configured: bool,
}
