//! The `HeaderProvider` capability.
//!
//! Platform clients that need ready-to-send request headers compose a
//! [`HeaderResolver`] instead of inheriting from an "enhanced" base class.
//! The resolver reads the platform's persisted header map and proxy settings,
//! asks the orchestrator for a fresh cookie, and falls back to the persisted
//! cookie when remote resolution fails and the fallback policy allows it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::base::error::SyncError;
use crate::config::platform::descriptor;
use crate::config::writer::ProxySettings;
use crate::sync::manager::SyncManager;

/// Ready-to-send request headers plus proxy settings for one platform.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlatformHeaders {
    /// Header entries in persisted order, cookie field set last-known-good.
    pub headers: Vec<(String, String)>,
    #[serde(skip)]
    pub proxies: ProxySettings,
}

impl PlatformHeaders {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Capability any platform client implements to obtain request headers.
#[async_trait]
pub trait HeaderProvider: Send + Sync {
    async fn resolve_headers(&self, platform: &str) -> Result<PlatformHeaders, SyncError>;
}

/// The standard `HeaderProvider`, composed around a [`SyncManager`].
pub struct HeaderResolver {
    manager: Arc<SyncManager>,
}

impl HeaderResolver {
    pub fn new(manager: Arc<SyncManager>) -> Self {
        HeaderResolver { manager }
    }

    fn set_cookie(headers: &mut Vec<(String, String)>, key: &str, cookie: String) {
        if let Some(slot) = headers.iter_mut().find(|(k, _)| k == key) {
            slot.1 = cookie;
        } else {
            headers.push((key.to_string(), cookie));
        }
    }
}

#[async_trait]
impl HeaderProvider for HeaderResolver {
    /// Build the platform's headers, preferring a freshly synchronized
    /// cookie.
    ///
    /// When resolution fails (disabled, remote down, no match) and fallback
    /// is enabled, the cookie already persisted in the platform config is
    /// kept. With fallback disabled the resolution error propagates.
    async fn resolve_headers(&self, platform: &str) -> Result<PlatformHeaders, SyncError> {
        let desc = descriptor(platform).ok_or_else(|| {
            SyncError::persist_failure(platform, "no descriptor for platform")
        })?;

        let config = self.manager.writer().read_header_config(platform)?;
        let mut headers = config.headers;

        match self.manager.resolve(platform, false).await {
            Ok(cookie) => {
                tracing::debug!(platform = %platform, "using synchronized cookie");
                Self::set_cookie(&mut headers, desc.cookie_key, cookie);
            }
            Err(e) if self.manager.settings().fallback_enabled => {
                tracing::warn!(platform = %platform, error = %e, "falling back to persisted cookie");
                if !headers.iter().any(|(k, _)| k == desc.cookie_key) {
                    tracing::warn!(platform = %platform, "no cookie available for platform");
                }
            }
            Err(e) => return Err(e),
        }

        Ok(PlatformHeaders {
            headers,
            proxies: config.proxies,
        })
    }
}
