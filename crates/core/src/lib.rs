//! `wayfinder-core` — shared foundation for the navigation core.
//!
//! This crate contains **pure** primitives: typed identifiers and route-path
//! utilities. No I/O, no shared state.

pub mod id;
pub mod path;

pub use id::{MenuId, UserId};
