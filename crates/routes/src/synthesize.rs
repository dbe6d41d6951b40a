use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use wayfinder_core::path;
use wayfinder_menu::{DirectoryNode, LeafNode, MalformedTreeError, MenuNode, Visibility};

use crate::component::ComponentRegistry;
use crate::node::{RouteMeta, RouteNode};

/// Synthesis is atomic: any error here aborts the whole run and no partial
/// route tree reaches the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("duplicate route name '{name}' for paths '{first}' and '{second}'")]
    DuplicateRouteName {
        name: String,
        first: String,
        second: String,
    },
    #[error(transparent)]
    Malformed(#[from] MalformedTreeError),
}

/// Derive a route name from an absolute path by concatenating the
/// capitalized form of each segment: `/system/user` becomes `SystemUser`.
pub fn derive_route_name(full_path: &str) -> String {
    path::segments(full_path)
        .map(capitalize)
        .collect::<Vec<_>>()
        .concat()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Transform a normalized menu tree into the navigable route tree.
///
/// Per node, in sibling order: actions never route; hidden nodes route but
/// are flagged hidden; directories get the container shell and a redirect
/// to their first visible child; leaves resolve their view against the
/// registry, with misses downgraded to the not-found view.
pub fn synthesize(
    tree: &[MenuNode],
    registry: &ComponentRegistry,
) -> Result<Vec<RouteNode>, SynthesisError> {
    let mut seen_names: HashMap<String, String> = HashMap::new();
    synthesize_level(tree, "/", registry, &mut seen_names)
}

fn synthesize_level(
    nodes: &[MenuNode],
    base: &str,
    registry: &ComponentRegistry,
    seen_names: &mut HashMap<String, String>,
) -> Result<Vec<RouteNode>, SynthesisError> {
    let mut routes = Vec::new();
    for node in nodes {
        match node {
            MenuNode::Action(_) => {}
            MenuNode::Directory(dir) => {
                routes.push(synthesize_directory(dir, base, registry, seen_names)?);
            }
            MenuNode::Leaf(leaf) => {
                routes.push(synthesize_leaf(leaf, base, registry, seen_names)?);
            }
        }
    }
    Ok(routes)
}

fn synthesize_directory(
    dir: &DirectoryNode,
    base: &str,
    registry: &ComponentRegistry,
    seen_names: &mut HashMap<String, String>,
) -> Result<RouteNode, SynthesisError> {
    let full_path = path::join(base, &dir.path);
    let name = claim_name(&full_path, seen_names)?;

    // An explicit override that the registry does not know falls back to
    // the default shell; containers must always render.
    let component = dir
        .component
        .as_deref()
        .and_then(|c| registry.resolve(c))
        .unwrap_or_else(|| registry.layout());

    let redirect = dir
        .children
        .iter()
        .find(|child| child.visibility() == Visibility::Visible)
        .and_then(child_path)
        .map(|p| path::join(&full_path, p));

    let children = synthesize_level(&dir.children, &full_path, registry, seen_names)?;

    Ok(RouteNode {
        path: full_path,
        name,
        component,
        redirect,
        meta: RouteMeta {
            title: dir.label.clone(),
            icon: dir.icon.clone(),
            permission: dir.permission.clone(),
            hidden: dir.visibility == Visibility::Hidden,
            keep_alive: false,
            external: false,
        },
        children,
    })
}

fn synthesize_leaf(
    leaf: &LeafNode,
    base: &str,
    registry: &ComponentRegistry,
    seen_names: &mut HashMap<String, String>,
) -> Result<RouteNode, SynthesisError> {
    let full_path = path::join(base, &leaf.path);
    let name = claim_name(&full_path, seen_names)?;

    let component = match registry.resolve(&leaf.component) {
        Some(component) => component,
        None => {
            warn!(
                component = %leaf.component,
                path = %full_path,
                "view component not registered; falling back to the not-found view"
            );
            registry.not_found()
        }
    };

    let children = synthesize_level(&leaf.children, &full_path, registry, seen_names)?;

    Ok(RouteNode {
        path: full_path,
        name,
        component,
        redirect: None,
        meta: RouteMeta {
            title: leaf.label.clone(),
            icon: leaf.icon.clone(),
            permission: leaf.permission.clone(),
            hidden: leaf.visibility == Visibility::Hidden,
            keep_alive: leaf.is_cached,
            external: leaf.is_external_link,
        },
        children,
    })
}

fn claim_name(
    full_path: &str,
    seen_names: &mut HashMap<String, String>,
) -> Result<String, SynthesisError> {
    let name = derive_route_name(full_path);
    if let Some(first) = seen_names.get(&name) {
        return Err(SynthesisError::DuplicateRouteName {
            name,
            first: first.clone(),
            second: full_path.to_string(),
        });
    }
    seen_names.insert(name.clone(), full_path.to_string());
    Ok(name)
}

fn child_path(node: &MenuNode) -> Option<&str> {
    match node {
        MenuNode::Directory(d) => Some(&d.path),
        MenuNode::Leaf(l) => Some(&l.path),
        MenuNode::Action(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_auth::Permission;
    use wayfinder_core::MenuId;
    use wayfinder_menu::{ActionNode, Status};

    fn registry() -> ComponentRegistry {
        let mut registry = ComponentRegistry::with_builtins();
        registry.register("system/user/index");
        registry.register("system/role/index");
        registry
    }

    fn dir(id: i64, p: &str, children: Vec<MenuNode>) -> MenuNode {
        dir_vis(id, p, Visibility::Visible, children)
    }

    fn dir_vis(id: i64, p: &str, visibility: Visibility, children: Vec<MenuNode>) -> MenuNode {
        MenuNode::Directory(DirectoryNode {
            id: MenuId::new(id),
            label: p.to_string(),
            parent: None,
            sort_key: 0,
            path: p.to_string(),
            component: None,
            icon: None,
            visibility,
            status: Status::Active,
            permission: None,
            children,
        })
    }

    fn leaf(id: i64, p: &str, component: &str) -> MenuNode {
        leaf_vis(id, p, component, Visibility::Visible)
    }

    fn leaf_vis(id: i64, p: &str, component: &str, visibility: Visibility) -> MenuNode {
        MenuNode::Leaf(LeafNode {
            id: MenuId::new(id),
            label: p.to_string(),
            parent: None,
            sort_key: 0,
            path: p.to_string(),
            component: component.to_string(),
            query: None,
            icon: None,
            is_external_link: false,
            is_cached: false,
            visibility,
            status: Status::Active,
            permission: Some(Permission::from(format!("{p}.read"))),
            children: Vec::new(),
        })
    }

    fn action(id: i64) -> MenuNode {
        MenuNode::Action(ActionNode {
            id: MenuId::new(id),
            label: "export".to_string(),
            parent: None,
            sort_key: 0,
            status: Status::Active,
            permission: Some(Permission::new("user.export")),
        })
    }

    #[test]
    fn actions_never_produce_routes() {
        let tree = vec![dir(
            1,
            "/system",
            vec![leaf(2, "user", "system/user/index"), action(3)],
        )];
        let routes = synthesize(&tree, &registry()).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].children.len(), 1);
        // Total routes never exceed total nodes.
        assert!(routes[0].count() <= 3);
    }

    #[test]
    fn route_names_concatenate_capitalized_segments() {
        assert_eq!(derive_route_name("/system/user"), "SystemUser");
        assert_eq!(derive_route_name("/dashboard"), "Dashboard");
        let tree = vec![dir(1, "/system", vec![leaf(2, "user", "system/user/index")])];
        let routes = synthesize(&tree, &registry()).unwrap();
        assert_eq!(routes[0].name, "System");
        assert_eq!(routes[0].children[0].name, "SystemUser");
    }

    #[test]
    fn duplicate_names_abort_the_whole_synthesis() {
        // "/a/b" as a nested leaf and "/a/b" as a top-level directory both
        // derive the name "AB".
        let tree = vec![
            dir(1, "/a", vec![leaf(2, "b", "system/user/index")]),
            dir(3, "/a/b", vec![]),
        ];
        let err = synthesize(&tree, &registry()).unwrap_err();
        let SynthesisError::DuplicateRouteName { name, .. } = err else {
            panic!("expected duplicate name error");
        };
        assert_eq!(name, "AB");
    }

    #[test]
    fn directory_redirect_targets_first_visible_child() {
        let tree = vec![dir(
            1,
            "/system",
            vec![
                leaf_vis(2, "audit", "system/user/index", Visibility::Hidden),
                leaf(3, "user", "system/user/index"),
                leaf(4, "role", "system/role/index"),
            ],
        )];
        let routes = synthesize(&tree, &registry()).unwrap();
        assert_eq!(routes[0].redirect.as_deref(), Some("/system/user"));
    }

    #[test]
    fn directory_with_only_hidden_children_has_no_redirect() {
        let tree = vec![dir(
            1,
            "/system",
            vec![leaf_vis(2, "audit", "system/user/index", Visibility::Hidden)],
        )];
        let routes = synthesize(&tree, &registry()).unwrap();
        assert!(routes[0].redirect.is_none());
        assert_eq!(routes[0].children.len(), 1);
    }

    #[test]
    fn hidden_nodes_still_route_but_are_flagged() {
        let tree = vec![dir(
            1,
            "/system",
            vec![leaf_vis(2, "detail", "system/user/index", Visibility::Hidden)],
        )];
        let routes = synthesize(&tree, &registry()).unwrap();
        let detail = &routes[0].children[0];
        assert_eq!(detail.path, "/system/detail");
        assert!(detail.meta.hidden);
    }

    #[test]
    fn component_miss_downgrades_to_not_found_view() {
        let reg = registry();
        let tree = vec![dir(1, "/system", vec![leaf(2, "ghost", "no/such/view")])];
        let routes = synthesize(&tree, &reg).unwrap();
        assert_eq!(routes[0].children[0].component, reg.not_found());
    }

    #[test]
    fn directory_component_override_resolves_or_falls_back() {
        let mut tree_dir = DirectoryNode {
            id: MenuId::new(1),
            label: "ext".to_string(),
            parent: None,
            sort_key: 0,
            path: "/ext".to_string(),
            component: Some("layout/blank".to_string()),
            icon: None,
            visibility: Visibility::Visible,
            status: Status::Active,
            permission: None,
            children: Vec::new(),
        };
        let reg = registry();

        let routes = synthesize(&[MenuNode::Directory(tree_dir.clone())], &reg).unwrap();
        assert_eq!(routes[0].component.key(), "layout/blank");

        tree_dir.component = Some("layout/unknown".to_string());
        let routes = synthesize(&[MenuNode::Directory(tree_dir)], &reg).unwrap();
        assert_eq!(routes[0].component, reg.layout());
    }
}
