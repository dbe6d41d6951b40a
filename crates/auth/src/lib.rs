//! `wayfinder-auth` — permission tokens and the session credential pair.
//!
//! This crate is intentionally decoupled from transport and storage: it
//! defines what a permission grant *means* and what a credential pair *is*,
//! not how either is obtained.

pub mod credential;
pub mod permission;
pub mod permission_set;

pub use credential::{SessionCredential, TokenPair, UserSnapshot};
pub use permission::Permission;
pub use permission_set::PermissionSet;
