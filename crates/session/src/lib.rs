//! `wayfinder-session` — the owned session context and its persistence.
//!
//! One `Session` object holds everything that is shared and mutable for the
//! active session: the credential pair and the navigation lifecycle state.
//! Every other component receives it by handle and re-reads it after any
//! suspension point, so nothing ever acts on a stale copy.

pub mod session;
pub mod snapshot;
pub mod state;
pub mod store;

pub use session::Session;
pub use snapshot::NavSnapshot;
pub use state::NavigationState;
pub use store::{CredentialStore, FileStore, MemoryStore, SnapshotStore, StoreError};
