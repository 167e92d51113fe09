//! Remote cookie store contract and data types.
//!
//! The remote store itself (wire protocol, payload decryption) is an external
//! collaborator and is not implemented here. This module defines the seam:
//! - [`RemoteCookieClient`](client::RemoteCookieClient): the one-operation
//!   fetch contract
//! - [`CookieSnapshot`](record::CookieSnapshot): the decrypted cookie set one
//!   fetch yields

pub mod client;
pub mod record;
