use thiserror::Error;

/// Error kinds produced by the synchronization engine.
///
/// All of these are recoverable at the call site: a failed single-platform
/// resolution or persist never aborts a multi-platform batch, and the worst
/// outcome of any of them is "this platform's cookie was not refreshed",
/// leaving prior cache and on-disk state untouched.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SyncError {
    /// The feature is globally disabled. A no-op outcome, not a fault.
    #[error("Cookie synchronization is disabled")]
    Disabled,

    /// The remote store call failed or returned nothing usable.
    #[error("Remote cookie store unavailable: {reason}")]
    RemoteUnavailable { reason: String },

    /// Remote data was present but held no cookie for the platform's domain.
    #[error("No cookies matched domain {domain} for platform {platform}")]
    NoMatch { platform: String, domain: String },

    /// The platform's configuration resource is missing, unparsable, or
    /// unwritable. The specific cause is logged at the failure site.
    #[error("Failed to persist cookie for platform {platform}: {reason}")]
    PersistFailure { platform: String, reason: String },
}

impl SyncError {
    /// Create a remote-unavailable error.
    pub fn remote_unavailable(reason: impl Into<String>) -> Self {
        SyncError::RemoteUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a no-match error.
    pub fn no_match(platform: impl Into<String>, domain: impl Into<String>) -> Self {
        SyncError::NoMatch {
            platform: platform.into(),
            domain: domain.into(),
        }
    }

    /// Create a persist-failure error.
    pub fn persist_failure(platform: impl Into<String>, reason: impl Into<String>) -> Self {
        SyncError::PersistFailure {
            platform: platform.into(),
            reason: reason.into(),
        }
    }
}
