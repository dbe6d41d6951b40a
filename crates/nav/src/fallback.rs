//! Built-in routes: the whitelist pair that needs no session, and the
//! minimal default set that keeps the application usable when synthesis
//! fails.

use wayfinder_routes::{ComponentRegistry, RouteMeta, RouteNode};

pub const LOGIN_PATH: &str = "/login";
pub const NOT_FOUND_PATH: &str = "/404";
pub const LANDING_PATH: &str = "/dashboard";

/// Paths resolvable without authentication.
pub const WHITELIST: [&str; 2] = [LOGIN_PATH, NOT_FOUND_PATH];

fn meta(title: &str) -> RouteMeta {
    RouteMeta {
        title: title.to_string(),
        icon: None,
        permission: None,
        hidden: true,
        keep_alive: false,
        external: false,
    }
}

pub fn login_route(components: &ComponentRegistry) -> RouteNode {
    RouteNode {
        path: LOGIN_PATH.to_string(),
        name: "Login".to_string(),
        component: components.login(),
        redirect: None,
        meta: meta("Login"),
        children: Vec::new(),
    }
}

pub fn not_found_route(components: &ComponentRegistry) -> RouteNode {
    RouteNode {
        path: NOT_FOUND_PATH.to_string(),
        name: "NotFound".to_string(),
        component: components.not_found(),
        redirect: None,
        meta: meta("404"),
        children: Vec::new(),
    }
}

/// Degraded-mode route set: just the landing page, so a failed synthesis
/// never leaves the user on a blank screen.
pub fn fallback_routes(components: &ComponentRegistry) -> Vec<RouteNode> {
    vec![RouteNode {
        path: "/".to_string(),
        name: "Root".to_string(),
        component: components.layout(),
        redirect: Some(LANDING_PATH.to_string()),
        meta: meta(""),
        children: vec![RouteNode {
            path: LANDING_PATH.to_string(),
            name: "Dashboard".to_string(),
            component: components.dashboard(),
            redirect: None,
            meta: RouteMeta {
                title: "Dashboard".to_string(),
                icon: Some("dashboard".to_string()),
                permission: None,
                hidden: false,
                keep_alive: false,
                external: false,
            },
            children: Vec::new(),
        }],
    }]
}
