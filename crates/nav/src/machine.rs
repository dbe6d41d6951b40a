use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing::{info, warn};

use wayfinder_client::{ApiError, MenuApi};
use wayfinder_core::path;
use wayfinder_menu::{extract_permissions, normalize_tree, MalformedTreeError};
use wayfinder_routes::{display_menu, synthesize, ComponentRegistry, MenuItem, SynthesisError};
use wayfinder_session::{NavSnapshot, NavigationState, Session};

use crate::fallback::{self, LANDING_PATH, LOGIN_PATH, NOT_FOUND_PATH};
use crate::registry::RouteRegistry;
use crate::resolution::Resolution;

#[derive(Debug, Error)]
enum GenerateError {
    #[error(transparent)]
    Fetch(#[from] ApiError),
    #[error(transparent)]
    Malformed(#[from] MalformedTreeError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

/// The navigation state machine.
///
/// One instance per process. Route registration lives here and dies with
/// the process; the permission/menu snapshot persists through the session
/// store, which is what makes reload-without-refetch possible.
pub struct Navigator {
    session: Arc<Session>,
    menu_api: MenuApi,
    components: Arc<ComponentRegistry>,
    registry: Mutex<RouteRegistry>,
    /// Serializes synthesis: a second navigation arriving mid-generation
    /// waits for the first instead of fetching the menu twice.
    generation_gate: tokio::sync::Mutex<()>,
}

impl Navigator {
    pub fn new(session: Arc<Session>, menu_api: MenuApi, components: Arc<ComponentRegistry>) -> Self {
        Self {
            session,
            menu_api,
            components,
            registry: Mutex::new(RouteRegistry::new()),
            generation_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Resolve a navigation attempt to its outcome.
    ///
    /// First use per session fetches the menu and synthesizes routes, then
    /// the original target is replayed against the committed tree. A failed
    /// synthesis degrades to the built-in fallback without marking the
    /// session ready, so the next attempt retries.
    pub async fn resolve(&self, target: &str) -> Resolution {
        let target = path::normalize(target);

        if target == NOT_FOUND_PATH {
            return Resolution::Allowed(fallback::not_found_route(&self.components));
        }
        if target == LOGIN_PATH {
            if !self.session.is_authenticated() {
                return Resolution::Allowed(fallback::login_route(&self.components));
            }
            // Authenticated users skip the login page and land home.
            self.ensure_routes().await;
            return self.match_and_guard(LANDING_PATH);
        }

        if !self.session.is_authenticated() {
            return Resolution::Unauthenticated {
                redirect_to: target,
            };
        }

        self.ensure_routes().await;
        self.match_and_guard(&target)
    }

    /// The displayable menu derived from the registered route tree.
    pub fn menu(&self) -> Vec<MenuItem> {
        display_menu(lock(&self.registry).tree())
    }

    /// Drop the registered routes (used together with `Session::clear` when
    /// the session ends).
    pub fn reset(&self) {
        lock(&self.registry).clear();
    }

    /// Make sure a route tree is registered for the current session.
    async fn ensure_routes(&self) {
        if self.session.nav_state().is_ready() && !lock(&self.registry).is_empty() {
            return;
        }

        let _gate = self.generation_gate.lock().await;
        // State may have moved while we waited on the gate.
        if self.session.nav_state().is_ready() && !lock(&self.registry).is_empty() {
            return;
        }

        // A persisted ready snapshot means this is a restart within a
        // still-valid session: re-register locally, skip the fetch.
        if let Some(snapshot) = self.session.load_snapshot() {
            if snapshot.ready && !snapshot.is_empty() && self.reregister(snapshot) {
                return;
            }
        }

        self.generate().await;
    }

    /// Rebuild routes from the persisted snapshot without touching the
    /// network. Returns false if the snapshot no longer synthesizes.
    fn reregister(&self, snapshot: NavSnapshot) -> bool {
        match synthesize(&snapshot.menu, &self.components) {
            Ok(routes) => {
                info!("re-registered routes from the persisted snapshot");
                lock(&self.registry).install(routes);
                self.session.set_permissions(snapshot.permissions);
                self.session.set_nav_state(NavigationState::Ready);
                true
            }
            Err(err) => {
                warn!(error = %err, "persisted snapshot failed to synthesize; regenerating");
                false
            }
        }
    }

    async fn generate(&self) {
        self.session.set_nav_state(NavigationState::Generating);
        match self.try_generate().await {
            Ok(()) => {
                self.session.set_nav_state(NavigationState::Ready);
                info!("route tree committed");
            }
            Err(err) => {
                warn!(error = %err, "menu synthesis failed; falling back to default routes");
                lock(&self.registry).install(fallback::fallback_routes(&self.components));
                // Deliberately not Ready: the next attempt retries.
                self.session.set_nav_state(NavigationState::Unset);
            }
        }
    }

    async fn try_generate(&self) -> Result<(), GenerateError> {
        let records = self.menu_api.fetch_user_menu_tree().await?;
        let menu = normalize_tree(&records)?;
        let permissions = extract_permissions(&menu);
        let routes = synthesize(&menu, &self.components)?;

        // Commit: routes, permissions and snapshot swap together. Nothing
        // partial ever lands here because every fallible step is above.
        lock(&self.registry).install(routes);
        self.session.set_permissions(permissions.clone());
        self.session
            .save_snapshot(&NavSnapshot::new(permissions, menu));
        Ok(())
    }

    fn match_and_guard(&self, target: &str) -> Resolution {
        let registry = lock(&self.registry);
        let Some(route) = registry.match_path(target) else {
            return Resolution::NotFound {
                path: target.to_string(),
            };
        };
        if let Some(required) = &route.meta.permission {
            if !self.session.grants(required.as_str()) {
                warn!(path = %target, required = %required, "navigation denied");
                return Resolution::Denied {
                    path: target.to_string(),
                    required: required.clone(),
                };
            }
        }
        Resolution::Allowed(route.clone())
    }
}

fn lock(registry: &Mutex<RouteRegistry>) -> MutexGuard<'_, RouteRegistry> {
    registry
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
