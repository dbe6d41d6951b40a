//! `wayfinder-routes` — route tree synthesis from the canonical menu tree.
//!
//! Turns `MenuNode` trees into the navigable `RouteNode` tree the shell
//! renders: visibility filtering for the displayed menu, redirect inference
//! for containers, and component resolution against a startup-time registry.

pub mod component;
pub mod display;
pub mod node;
pub mod synthesize;

pub use component::{ComponentRef, ComponentRegistry};
pub use display::{display_menu, MenuItem};
pub use node::{RouteMeta, RouteNode};
pub use synthesize::{derive_route_name, synthesize, SynthesisError};
