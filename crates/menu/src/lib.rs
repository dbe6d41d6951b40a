//! `wayfinder-menu` — canonical menu tree model and its builders.
//!
//! The backend describes navigable/actionable entities as a tree of loosely
//! typed records. This crate turns those records into one canonical,
//! immutable tree (`MenuNode`) and derives the flat permission set from it.
//! Trees are rebuilt wholesale on each regeneration, never patched in place.

pub mod extract;
pub mod node;
pub mod normalize;
pub mod raw;

pub use extract::extract_permissions;
pub use node::{ActionNode, DirectoryNode, LeafNode, MenuNode, Status, Visibility};
pub use normalize::{MalformedTreeError, normalize_tree, MAX_DEPTH};
pub use raw::{LooseValue, RawMenuRecord};
