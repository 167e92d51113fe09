//! The orchestrator: cache-first resolution, refresh-and-persist, and the
//! administrative surface.
//!
//! A `SyncManager` is explicitly constructed and passed to its callers (API
//! handlers, schedulers) rather than living as process-wide state. Callers in
//! the same process may refresh concurrently, so the resolve-then-persist
//! sequence runs under a per-platform lock; distinct platforms never block
//! each other.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use time::Duration;
use tokio::sync::Mutex;

use crate::base::error::SyncError;
use crate::config::source::{ConfigSummary, SyncSettings};
use crate::config::writer::ConfigWriter;
use crate::store::client::RemoteCookieClient;
use crate::sync::cache::{CacheStatus, TtlCache};
use crate::sync::matcher;

/// Per-platform outcome of a batch refresh.
///
/// One platform's failure never aborts or affects another's attempt; every
/// platform gets its own recorded result.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub results: BTreeMap<String, bool>,
}

impl RefreshReport {
    pub fn succeeded(&self) -> usize {
        self.results.values().filter(|ok| **ok).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(platform, _)| platform.as_str())
            .collect()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.values().all(|ok| *ok)
    }

    /// Operator-facing one-liner: counts plus the names of failing platforms.
    pub fn summary(&self) -> String {
        let mut line = format!("refresh complete: {}/{} succeeded", self.succeeded(), self.total());
        let failed = self.failed();
        if !failed.is_empty() {
            line.push_str(&format!(", failed: {}", failed.join(", ")));
        }
        line
    }
}

/// Stats returned by a successful connection test.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionSummary {
    pub total_domains: usize,
    pub total_cookies: usize,
    pub update_time: Option<String>,
    pub sample_domains: Vec<String>,
}

/// Composes the cache, remote store client, domain matcher, and config
/// writer into the resolution and refresh flows.
pub struct SyncManager {
    settings: SyncSettings,
    client: Arc<dyn RemoteCookieClient>,
    cache: TtlCache,
    writer: ConfigWriter,
    // One lock per platform key; resolve-then-persist runs under it.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SyncManager {
    /// `root` is the directory the per-platform config paths are resolved
    /// against.
    pub fn new(
        settings: SyncSettings,
        client: Arc<dyn RemoteCookieClient>,
        root: impl Into<PathBuf>,
    ) -> Self {
        let ttl = Duration::seconds(settings.cache_ttl_seconds as i64);
        SyncManager {
            settings,
            client,
            cache: TtlCache::new(ttl),
            writer: ConfigWriter::new(root),
            locks: DashMap::new(),
        }
    }

    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    pub fn writer(&self) -> &ConfigWriter {
        &self.writer
    }

    /// The canonical domain used to filter the remote set for a platform.
    ///
    /// Platforms missing from the mapping fall back to `<platform>.com`; an
    /// explicit default, not an error.
    pub fn canonical_domain(&self, platform: &str) -> String {
        self.settings
            .domain_mapping
            .get(platform)
            .cloned()
            .unwrap_or_else(|| format!("{platform}.com"))
    }

    /// Resolve one platform's cookie string, cache-first with remote
    /// fallback.
    ///
    /// Failure leaves prior state untouched: neither a remote error nor an
    /// empty match mutates the cache, so a stale but previously good value
    /// survives a transient hiccup.
    pub async fn resolve(&self, platform: &str, force_refresh: bool) -> Result<String, SyncError> {
        if !self.settings.enabled {
            tracing::debug!(platform = %platform, "cookie sync disabled, skipping");
            return Err(SyncError::Disabled);
        }

        if !force_refresh {
            if let Some(cached) = self.cache.get(platform) {
                tracing::debug!(platform = %platform, "serving cookie from cache");
                return Ok(cached);
            }
        }

        tracing::debug!(platform = %platform, "fetching cookie set from remote store");
        let snapshot = self.client.fetch_all().await?;
        if snapshot.is_empty() {
            tracing::warn!(platform = %platform, "remote store returned an empty cookie set");
            return Err(SyncError::remote_unavailable(
                "remote store returned an empty cookie set",
            ));
        }

        let domain = self.canonical_domain(platform);
        let matched = matcher::select(&domain, &snapshot);
        if matched.is_empty() {
            tracing::warn!(platform = %platform, domain = %domain, "no cookies matched");
            return Err(SyncError::no_match(platform, domain));
        }

        let cookie = matcher::format_cookie_header(&matched);
        self.cache.put(platform, cookie.clone());
        tracing::info!(
            platform = %platform,
            domain = %domain,
            count = matched.len(),
            "resolved cookies from remote store"
        );
        Ok(cookie)
    }

    /// Force-resolve one platform and persist the result into its config.
    /// Success requires both steps; the whole sequence holds the platform's
    /// lock.
    pub async fn refresh_and_persist(&self, platform: &str) -> Result<(), SyncError> {
        self.refresh_one(platform, true).await
    }

    /// Refresh a set of platforms (all mapped platforms when `None`),
    /// persisting each result.
    ///
    /// Attempts are independent; the report records a boolean per platform.
    /// Explicitly requested platforms unknown to the mapping are attempted
    /// and recorded as failures rather than rejecting the batch.
    pub async fn refresh(&self, platforms: Option<&[String]>, force_refresh: bool) -> RefreshReport {
        let targets: Vec<String> = match platforms {
            Some(list) => list.to_vec(),
            None => self.settings.domain_mapping.keys().cloned().collect(),
        };

        let mut results = BTreeMap::new();
        for platform in targets {
            let outcome = self.refresh_one(&platform, force_refresh).await;
            match &outcome {
                Ok(()) => tracing::info!(platform = %platform, "cookie refreshed"),
                Err(e) => tracing::error!(platform = %platform, error = %e, "cookie refresh failed"),
            }
            results.insert(platform, outcome.is_ok());
        }

        let report = RefreshReport { results };
        tracing::info!(summary = %report.summary(), "batch refresh finished");
        report
    }

    /// Force-refresh every platform in the mapping.
    pub async fn refresh_all(&self) -> RefreshReport {
        self.refresh(None, true).await
    }

    async fn refresh_one(&self, platform: &str, force_refresh: bool) -> Result<(), SyncError> {
        let lock = self.platform_lock(platform);
        let _guard = lock.lock().await;

        let cookie = self.resolve(platform, force_refresh).await?;
        self.writer.persist(platform, &cookie)
    }

    /// Cache status for every platform in the mapping. Pure read.
    pub fn status(&self) -> BTreeMap<String, CacheStatus> {
        self.settings
            .domain_mapping
            .keys()
            .map(|platform| (platform.clone(), self.cache.status(platform)))
            .collect()
    }

    /// Fetch once and summarize what the store holds.
    pub async fn test_connection(&self) -> Result<ConnectionSummary, SyncError> {
        if !self.settings.enabled {
            return Err(SyncError::Disabled);
        }

        let snapshot = self.client.fetch_all().await?;
        if snapshot.is_empty() {
            return Err(SyncError::remote_unavailable("no data returned"));
        }

        Ok(ConnectionSummary {
            total_domains: snapshot.domain_count(),
            total_cookies: snapshot.cookie_count(),
            update_time: snapshot.update_time().map(str::to_string),
            sample_domains: snapshot.sample_domains(5),
        })
    }

    /// The platform-to-domain mapping, read-only.
    pub fn list_platforms(&self) -> &BTreeMap<String, String> {
        &self.settings.domain_mapping
    }

    /// Administrative reset of the cookie cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
        tracing::info!("cookie cache cleared");
    }

    /// Non-sensitive configuration view.
    pub fn config_summary(&self) -> ConfigSummary {
        self.settings.summary()
    }

    fn platform_lock(&self, platform: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(platform.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
