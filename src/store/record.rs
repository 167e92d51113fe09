//! Cookie records and the full-set snapshot returned by a fetch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One name/value/domain triple from the remote store.
///
/// The remote payload carries additional per-cookie metadata (path, expiry,
/// flags); the engine ignores everything beyond these three fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub domain: String,
}

impl CookieRecord {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        CookieRecord {
            name: name.into(),
            value: value.into(),
            domain: domain.into(),
        }
    }
}

/// Reserved key in the raw decrypted mapping that carries the store-side
/// update timestamp instead of a cookie list.
pub const UPDATE_TIME_KEY: &str = "update_time";

/// The full decrypted cookie set from one fetch.
///
/// Immutable once built; scoped to a single fetch. Domains are kept in a
/// `BTreeMap` so iteration (and therefore batch results) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct CookieSnapshot {
    domains: BTreeMap<String, Vec<CookieRecord>>,
    update_time: Option<String>,
}

impl CookieSnapshot {
    pub fn new(domains: BTreeMap<String, Vec<CookieRecord>>, update_time: Option<String>) -> Self {
        CookieSnapshot {
            domains,
            update_time,
        }
    }

    /// Build a snapshot from the raw decrypted mapping.
    ///
    /// The reserved `update_time` key is routed out of the domain map, and
    /// any other entry that is not a list of records is skipped.
    pub fn from_json(raw: &serde_json::Value) -> Self {
        let mut domains = BTreeMap::new();
        let mut update_time = None;

        if let Some(map) = raw.as_object() {
            for (key, value) in map {
                if key == UPDATE_TIME_KEY {
                    update_time = match value {
                        serde_json::Value::String(s) => Some(s.clone()),
                        serde_json::Value::Null => None,
                        other => Some(other.to_string()),
                    };
                    continue;
                }
                if let Ok(records) = serde_json::from_value::<Vec<CookieRecord>>(value.clone()) {
                    domains.insert(key.clone(), records);
                } else {
                    tracing::debug!(domain = %key, "skipping non-list entry in cookie set");
                }
            }
        }

        CookieSnapshot {
            domains,
            update_time,
        }
    }

    pub fn domains(&self) -> &BTreeMap<String, Vec<CookieRecord>> {
        &self.domains
    }

    pub fn update_time(&self) -> Option<&str> {
        self.update_time.as_deref()
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn cookie_count(&self) -> usize {
        self.domains.values().map(Vec::len).sum()
    }

    /// The first `n` domains, used for connection-test summaries.
    pub fn sample_domains(&self, n: usize) -> Vec<String> {
        self.domains.keys().take(n).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
