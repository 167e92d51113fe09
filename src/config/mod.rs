//! Engine configuration and per-platform persisted configs.
//!
//! - [`source`]: loads the engine's own settings (enable flag, cache TTL,
//!   platform mapping, fallback policy, store credentials)
//! - [`platform`]: the static per-platform descriptor table (config path,
//!   cookie field path and casing, default domain)
//! - [`writer`]: safe read-modify-write of a platform's persisted header
//!   configuration

pub mod platform;
pub mod source;
pub mod writer;
