//! Base types and error handling.
//!
//! Provides the foundational pieces shared by every other module:
//! - [`SyncError`](error::SyncError): the engine's error kinds
//! - [`Secret`](secret::Secret): a store credential that redacts itself

pub mod error;
pub mod secret;
