//! `wayfinder-nav` — the navigation state machine.
//!
//! Owns the per-session "routes generated" lifecycle: first navigation
//! triggers the menu fetch and route synthesis, failures degrade to a
//! built-in fallback, and a process restart re-registers from the persisted
//! snapshot instead of refetching. Every resolution passes the permission
//! guard.

pub mod fallback;
pub mod machine;
pub mod registry;
pub mod resolution;

pub use fallback::{LANDING_PATH, LOGIN_PATH, NOT_FOUND_PATH};
pub use machine::Navigator;
pub use registry::RouteRegistry;
pub use resolution::Resolution;
