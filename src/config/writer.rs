//! Safe read-modify-write of per-platform persisted header configs.
//!
//! Each platform's runtime owns its YAML config; the only field this engine
//! may touch is the cookie leaf named by the platform's descriptor. A persist
//! parses the whole document, replaces that one field, and rewrites the file
//! through a staged temp file in the same directory, so the config is never
//! observed half-written. Every unrelated field and the key ordering of the
//! document survive the rewrite.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::base::error::SyncError;
use crate::config::platform::{descriptor, PlatformDescriptor};

/// Header map and proxy settings read from a platform's config.
#[derive(Debug, Clone, Default)]
pub struct PlatformHeaderConfig {
    /// Header entries in file order, cookie field included if present.
    pub headers: Vec<(String, String)>,
    pub proxies: ProxySettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
}

/// Reads and rewrites per-platform configs under a single root directory.
pub struct ConfigWriter {
    root: PathBuf,
}

impl ConfigWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ConfigWriter { root: root.into() }
    }

    /// Replace the cookie field in the platform's config and write the whole
    /// file back atomically.
    ///
    /// A missing config file fails without mutating anything. Parse, field
    /// path, and write failures all surface as a single [`SyncError::PersistFailure`];
    /// the specific cause is logged here.
    pub fn persist(&self, platform: &str, cookie: &str) -> Result<(), SyncError> {
        let desc = self.descriptor_for(platform)?;
        let path = self.root.join(desc.config_path);

        if !path.exists() {
            tracing::error!(platform = %platform, path = %path.display(), "config file not found");
            return Err(SyncError::persist_failure(
                platform,
                format!("config file not found: {}", path.display()),
            ));
        }

        let text = fs::read_to_string(&path).map_err(|e| {
            tracing::error!(platform = %platform, error = %e, "failed to read config file");
            SyncError::persist_failure(platform, format!("read failed: {e}"))
        })?;

        let mut doc: Value = serde_yaml::from_str(&text).map_err(|e| {
            tracing::error!(platform = %platform, error = %e, "failed to parse config file");
            SyncError::persist_failure(platform, format!("parse failed: {e}"))
        })?;

        let headers = resolve_path_mut(&mut doc, desc.header_path).ok_or_else(|| {
            tracing::error!(
                platform = %platform,
                path = ?desc.header_path,
                "header map missing from config file"
            );
            SyncError::persist_failure(platform, "header map missing from config file")
        })?;

        let map = headers.as_mapping_mut().ok_or_else(|| {
            tracing::error!(platform = %platform, "header entry is not a mapping");
            SyncError::persist_failure(platform, "header entry is not a mapping")
        })?;
        map.insert(
            Value::String(desc.cookie_key.to_string()),
            Value::String(cookie.to_string()),
        );

        let rendered = serde_yaml::to_string(&doc).map_err(|e| {
            tracing::error!(platform = %platform, error = %e, "failed to serialize config");
            SyncError::persist_failure(platform, format!("serialize failed: {e}"))
        })?;

        stage_and_replace(&path, &rendered).map_err(|e| {
            tracing::error!(platform = %platform, error = %e, "failed to write config file");
            SyncError::persist_failure(platform, format!("write failed: {e}"))
        })?;

        tracing::info!(platform = %platform, path = %path.display(), "persisted cookie to config");
        Ok(())
    }

    /// The cookie currently persisted for a platform, if any.
    ///
    /// Used as the fallback value when remote resolution fails.
    pub fn read_cookie(&self, platform: &str) -> Option<String> {
        let desc = descriptor(platform)?;
        let config = self.read_header_config_inner(platform, desc).ok()?;
        config
            .headers
            .into_iter()
            .find(|(key, _)| key == desc.cookie_key)
            .map(|(_, value)| value)
    }

    /// Header map and proxy settings for a platform, in file order.
    pub fn read_header_config(&self, platform: &str) -> Result<PlatformHeaderConfig, SyncError> {
        let desc = self.descriptor_for(platform)?;
        self.read_header_config_inner(platform, desc)
    }

    fn descriptor_for(&self, platform: &str) -> Result<&'static PlatformDescriptor, SyncError> {
        descriptor(platform).ok_or_else(|| {
            tracing::warn!(platform = %platform, "no descriptor for platform");
            SyncError::persist_failure(platform, "no descriptor for platform")
        })
    }

    fn read_header_config_inner(
        &self,
        platform: &str,
        desc: &PlatformDescriptor,
    ) -> Result<PlatformHeaderConfig, SyncError> {
        let path = self.root.join(desc.config_path);
        let text = fs::read_to_string(&path).map_err(|e| {
            SyncError::persist_failure(platform, format!("read failed: {e}"))
        })?;
        let doc: Value = serde_yaml::from_str(&text).map_err(|e| {
            SyncError::persist_failure(platform, format!("parse failed: {e}"))
        })?;

        let mut headers = Vec::new();
        if let Some(map) = resolve_path(&doc, desc.header_path).and_then(Value::as_mapping) {
            for (key, value) in map {
                if let (Some(k), Some(v)) = (key.as_str(), value.as_str()) {
                    headers.push((k.to_string(), v.to_string()));
                }
            }
        } else {
            return Err(SyncError::persist_failure(
                platform,
                "header map missing from config file",
            ));
        }

        // Proxies sit next to the header map in the same platform block.
        let mut proxy_path: Vec<&str> = desc.header_path.to_vec();
        proxy_path.pop();
        proxy_path.push("proxies");
        let mut proxies = ProxySettings::default();
        if let Some(map) = resolve_path(&doc, &proxy_path).and_then(Value::as_mapping) {
            for (key, value) in map {
                match key.as_str() {
                    Some("http") => proxies.http = value.as_str().map(str::to_string),
                    Some("https") => proxies.https = value.as_str().map(str::to_string),
                    _ => {}
                }
            }
        }

        Ok(PlatformHeaderConfig { headers, proxies })
    }
}

fn resolve_path<'a>(doc: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let mut current = doc;
    for segment in segments {
        current = current.get(*segment)?;
    }
    Some(current)
}

fn resolve_path_mut<'a>(doc: &'a mut Value, segments: &[&str]) -> Option<&'a mut Value> {
    let mut current = doc;
    for segment in segments {
        current = current.get_mut(*segment)?;
    }
    Some(current)
}

/// Write `content` to a temp file in the target's directory, then replace the
/// target in one rename. The original survives any mid-write failure intact.
fn stage_and_replace(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.flush()?;
    staged
        .persist(path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    Ok(())
}
