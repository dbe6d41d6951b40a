use serde::{Deserialize, Serialize};

use crate::node::RouteNode;

/// One entry of the rendered navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    pub icon: Option<String>,
    pub path: String,
    pub external: bool,
    pub children: Vec<MenuItem>,
}

/// Project the route tree onto the displayable menu.
///
/// Hidden routes are omitted here and only here; they remain reachable by
/// direct path. Order follows the route tree.
pub fn display_menu(routes: &[RouteNode]) -> Vec<MenuItem> {
    routes
        .iter()
        .filter(|route| !route.meta.hidden)
        .map(|route| MenuItem {
            title: route.meta.title.clone(),
            icon: route.meta.icon.clone(),
            path: route.path.clone(),
            external: route.meta.external,
            children: display_menu(&route.children),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentRegistry;
    use crate::node::RouteMeta;

    fn route(path: &str, hidden: bool, children: Vec<RouteNode>) -> RouteNode {
        RouteNode {
            path: path.to_string(),
            name: path.to_string(),
            component: ComponentRegistry::with_builtins().layout(),
            redirect: None,
            meta: RouteMeta {
                title: path.to_string(),
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
    fn hidden_routes_are_omitted_from_the_menu() {
        let routes = vec![route(
            "/system",
            false,
            vec![
                route("/system/user", false, vec![]),
                route("/system/detail", true, vec![]),
            ],
        )];
        let menu = display_menu(&routes);
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].children.len(), 1);
        assert_eq!(menu[0].children[0].path, "/system/user");
    }

    #[test]
    fn a_hidden_parent_hides_its_subtree() {
        let routes = vec![route(
            "/internal",
            true,
            vec![route("/internal/tools", false, vec![])],
        )];
        assert!(display_menu(&routes).is_empty());
    }
}
