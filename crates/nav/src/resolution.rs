use wayfinder_auth::Permission;
use wayfinder_routes::RouteNode;

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target route, permission-checked. Directory routes carry their
    /// inferred redirect; the shell follows it.
    Allowed(RouteNode),

    /// No authenticated session. The original destination is preserved so
    /// login can redirect back to it.
    Unauthenticated { redirect_to: String },

    /// Authenticated but lacking the required permission. Terminal
    /// not-found state, distinct from `Unauthenticated`.
    Denied { path: String, required: Permission },

    /// No registered route for this path.
    NotFound { path: String },
}

impl Resolution {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Resolution::Allowed(_))
    }
}
