use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Well-known registry keys the core itself depends on.
pub mod keys {
    /// Default container shell rendered by Directory routes.
    pub const LAYOUT: &str = "layout/default";
    /// Bare container shell (no chrome).
    pub const BLANK_LAYOUT: &str = "layout/blank";
    /// Terminal view for unknown paths and component misses.
    pub const NOT_FOUND: &str = "error/not-found";
    /// Authentication entry point.
    pub const LOGIN: &str = "auth/login";
    /// Landing page used by the built-in fallback routes.
    pub const DASHBOARD: &str = "dashboard/index";
}

/// Opaque handle to a renderable view component.
///
/// The core never renders; it only hands these to the shell, which maps
/// them back to concrete renderers. Handles compare by registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry mapping stable string keys to view components.
///
/// Populated once at process start by the shell; the synthesizer only ever
/// reads it. A resolution miss is a first-class outcome, never a panic.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentRef>,
}

impl ComponentRegistry {
    /// Registry pre-populated with the views the core itself needs.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            components: HashMap::new(),
        };
        for key in [
            keys::LAYOUT,
            keys::BLANK_LAYOUT,
            keys::NOT_FOUND,
            keys::LOGIN,
            keys::DASHBOARD,
        ] {
            registry.register(key);
        }
        registry
    }

    /// Register a view under its normalized key, returning the handle.
    pub fn register(&mut self, key: &str) -> ComponentRef {
        let key = normalize_key(key);
        let handle = ComponentRef(key.clone());
        self.components.insert(key, handle.clone());
        handle
    }

    /// Look up a view by key. `None` is a resolution miss.
    pub fn resolve(&self, key: &str) -> Option<ComponentRef> {
        self.components.get(&normalize_key(key)).cloned()
    }

    pub fn layout(&self) -> ComponentRef {
        ComponentRef(keys::LAYOUT.to_string())
    }

    pub fn not_found(&self) -> ComponentRef {
        ComponentRef(keys::NOT_FOUND.to_string())
    }

    pub fn login(&self) -> ComponentRef {
        ComponentRef(keys::LOGIN.to_string())
    }

    pub fn dashboard(&self) -> ComponentRef {
        ComponentRef(keys::DASHBOARD.to_string())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Canonical key form: no surrounding slashes, no view-file extension.
/// Backends occasionally ship `"/system/user/index.vue"` style references.
fn normalize_key(key: &str) -> String {
    let key = key.trim().trim_matches('/');
    let key = key.strip_suffix(".vue").unwrap_or(key);
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_tolerates_slashes_and_extensions() {
        let mut registry = ComponentRegistry::with_builtins();
        registry.register("system/user/index");
        assert!(registry.resolve("system/user/index").is_some());
        assert!(registry.resolve("/system/user/index").is_some());
        assert!(registry.resolve("system/user/index.vue").is_some());
        assert!(registry.resolve("system/role/index").is_none());
    }

    #[test]
    fn builtins_are_always_present() {
        let registry = ComponentRegistry::with_builtins();
        assert!(registry.resolve(keys::LAYOUT).is_some());
        assert!(registry.resolve(keys::NOT_FOUND).is_some());
        assert_eq!(registry.not_found().key(), keys::NOT_FOUND);
    }
}
