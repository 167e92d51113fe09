//! The remote store seam.
//!
//! One operation, "fetch all": given server address + identity + secret, the
//! collaborator returns the full decrypted cookie set or fails. No partial or
//! paginated fetch exists. Timeouts and cancellation of the underlying call
//! are the collaborator's responsibility; the engine only requires that the
//! call eventually returns.

use async_trait::async_trait;
use url::Url;

use crate::base::error::SyncError;
use crate::base::secret::Secret;
use crate::store::record::CookieSnapshot;

/// Connection identity for the remote cookie store.
#[derive(Debug, Clone)]
pub struct StoreCredentials {
    pub server_url: Url,
    pub uuid: String,
    pub password: Secret,
}

impl StoreCredentials {
    pub fn new(server_url: Url, uuid: impl Into<String>, password: Secret) -> Self {
        StoreCredentials {
            server_url,
            uuid: uuid.into(),
            password,
        }
    }
}

/// Contract for the remote cookie store collaborator.
///
/// Implementations own the wire protocol and payload decryption; the engine
/// never sees either.
#[async_trait]
pub trait RemoteCookieClient: Send + Sync {
    /// Fetch the full decrypted cookie set.
    async fn fetch_all(&self) -> Result<CookieSnapshot, SyncError>;
}
