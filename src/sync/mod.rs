//! The synchronization engine.
//!
//! - [`matcher`]: selects the cookie records belonging to a platform's
//!   canonical domain and formats them into a header string
//! - [`cache`]: TTL-bounded cache of the last formatted cookie per platform
//! - [`headers`]: the `HeaderProvider` capability platform clients compose
//! - [`manager`]: the orchestrator tying cache, remote store, matcher, and
//!   config writer together, plus the administrative surface

pub mod cache;
pub mod headers;
pub mod manager;
pub mod matcher;
