//! # cookiesync
//!
//! A credential-synchronization engine that keeps local per-platform
//! configuration files supplied with fresh authentication cookies from a
//! remote encrypted cookie store.
//!
//! The remote store is an external collaborator: anything that can return the
//! full decrypted cookie set (`domain -> [cookie record]`) can back the
//! engine by implementing [`store::client::RemoteCookieClient`]. Everything
//! downstream of that seam lives here: matching records to a platform's
//! canonical domain, TTL-bounded caching to keep request frequency in check,
//! and atomic read-modify-write of each platform's persisted header config.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cookiesync::config::source::SyncSettings;
//! use cookiesync::sync::manager::SyncManager;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = SyncSettings::load_or_default("config.yaml");
//!     let client = Arc::new(MyStoreClient::new(settings.credentials.clone()));
//!     let manager = SyncManager::new(settings, client, "/srv/crawlers".into());
//!
//!     let report = manager.refresh_all().await;
//!     println!("{}", report.summary());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and the redacted secret wrapper
//! - [`config`] - Engine settings, per-platform descriptors, config writing
//! - [`store`] - Remote store contract and cookie record types
//! - [`sync`] - Domain matching, TTL cache, header capability, orchestrator
//!
//! ## Failure containment
//!
//! Every per-platform outcome is independent: a failed resolution or persist
//! never aborts a multi-platform batch, and never erases previously good
//! state (stale cache entries and on-disk cookies are left untouched on
//! failure). Nothing in this crate is fatal to the process.

pub mod base;
pub mod config;
pub mod store;
pub mod sync;

pub use base::error::SyncError;
pub use sync::manager::SyncManager;
