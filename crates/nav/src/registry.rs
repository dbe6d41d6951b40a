use std::collections::HashMap;

use wayfinder_core::path;
use wayfinder_routes::RouteNode;

/// In-memory route registration, scoped to the process lifetime.
///
/// A freshly constructed registry is empty; that emptiness is the
/// process-start signal the state machine consults, rather than probing for
/// some known path. Installation swaps the whole tree atomically.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    tree: Vec<RouteNode>,
    by_path: HashMap<String, RouteNode>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Replace the registered tree wholesale and rebuild the path index.
    pub fn install(&mut self, tree: Vec<RouteNode>) {
        let mut by_path = HashMap::new();
        for root in &tree {
            root.walk(&mut |route| {
                by_path.insert(path::normalize(&route.path), route.clone());
            });
        }
        self.tree = tree;
        self.by_path = by_path;
    }

    /// Exact-path lookup; hidden routes are reachable here by design.
    pub fn match_path(&self, target: &str) -> Option<&RouteNode> {
        self.by_path.get(&path::normalize(target))
    }

    pub fn tree(&self) -> &[RouteNode] {
        &self.tree
    }

    pub fn clear(&mut self) {
        self.tree.clear();
        self.by_path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_routes::{ComponentRegistry, RouteMeta};

    fn route(p: &str, hidden: bool, children: Vec<RouteNode>) -> RouteNode {
        RouteNode {
            path: p.to_string(),
            name: p.to_string(),
            component: ComponentRegistry::with_builtins().layout(),
            redirect: None,
            meta: RouteMeta {
                title: p.to_string(),
                icon: None,
                permission: None,
                hidden,
                keep_alive: false,
                external: false,
            },
            children,
        }
    }

    #[test]
    fn fresh_registry_is_the_process_start_signal() {
        assert!(RouteRegistry::new().is_empty());
    }

    #[test]
    fn install_indexes_the_whole_tree_including_hidden_routes() {
        let mut registry = RouteRegistry::new();
        registry.install(vec![route(
            "/system",
            false,
            vec![route("/system/detail", true, vec![])],
        )]);
        assert!(registry.match_path("/system").is_some());
        assert!(registry.match_path("/system/detail").is_some());
        assert!(registry.match_path("/system/detail/").is_some());
        assert!(registry.match_path("/nope").is_none());
    }

    #[test]
    fn install_replaces_rather_than_merges() {
        let mut registry = RouteRegistry::new();
        registry.install(vec![route("/old", false, vec![])]);
        registry.install(vec![route("/new", false, vec![])]);
        assert!(registry.match_path("/old").is_none());
        assert!(registry.match_path("/new").is_some());
    }
}
