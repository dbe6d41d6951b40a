use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wayfinder_auth::PermissionSet;
use wayfinder_menu::MenuNode;

/// Persisted navigation snapshot: the flat permission set and the
/// normalized menu tree the last successful synthesis was built from.
///
/// Route registration is transient per process lifetime, but this snapshot
/// survives a reload within the same session, so the routes can be
/// re-registered without another menu fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSnapshot {
    pub permissions: PermissionSet,
    pub menu: Vec<MenuNode>,
    pub ready: bool,
    pub saved_at: DateTime<Utc>,
}

impl NavSnapshot {
    pub fn new(permissions: PermissionSet, menu: Vec<MenuNode>) -> Self {
        Self {
            permissions,
            menu,
            ready: true,
            saved_at: Utc::now(),
        }
    }

    /// A snapshot with no menu carries nothing worth re-registering.
    pub fn is_empty(&self) -> bool {
        self.menu.is_empty()
    }
}
