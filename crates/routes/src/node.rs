use serde::{Deserialize, Serialize};

use wayfinder_auth::Permission;

use crate::component::ComponentRef;

/// Metadata attached to every synthesized route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteMeta {
    pub title: String,
    pub icon: Option<String>,
    /// Token the Permission Guard checks before this route resolves.
    pub permission: Option<Permission>,
    /// Hidden routes stay reachable by direct path but never appear in the
    /// rendered menu.
    pub hidden: bool,
    pub keep_alive: bool,
    pub external: bool,
}

/// One node of the navigable route tree.
///
/// Paths are absolute. Directory-derived routes carry a container component
/// and possibly a redirect; every other route carries a resolved leaf view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    pub path: String,
    /// Derived name, unique across the whole tree.
    pub name: String,
    pub component: ComponentRef,
    pub redirect: Option<String>,
    pub meta: RouteMeta,
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    /// Total number of routes in this subtree, self included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RouteNode::count).sum::<usize>()
    }

    /// Depth-first traversal over this subtree.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a RouteNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}
