use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Flat, deduplicated set of permission tokens for the active session.
///
/// This is the predicate consulted on every navigation attempt and by the
/// rendering layer for control visibility. Membership honors exact tokens,
/// the universal wildcard `*`, and `prefix.*` wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    tokens: HashSet<Permission>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw token strings. Empty tokens are never inserted.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens = tokens
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.is_empty())
            .map(Permission::from)
            .collect();
        Self { tokens }
    }

    /// Insert a single permission. Empty tokens are ignored.
    pub fn insert(&mut self, permission: Permission) {
        if !permission.as_str().is_empty() {
            self.tokens.insert(permission);
        }
    }

    /// Test whether `token` is granted by this set.
    pub fn grants(&self, token: &str) -> bool {
        self.tokens.iter().any(|stored| stored.covers(token))
    }

    /// True when at least one of `tokens` is granted. An empty list is
    /// trivially granted (nothing was required).
    pub fn grants_any<'a, I>(&self, tokens: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut required = tokens.into_iter().peekable();
        if required.peek().is_none() {
            return true;
        }
        required.any(|t| self.grants(t))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        let mut set = Self::new();
        for p in iter {
            set.insert(p);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_exact_and_wildcard_forms() {
        let set = PermissionSet::from_tokens(["user.*"]);
        assert!(set.grants("user.create"));

        let set = PermissionSet::from_tokens(["user.create"]);
        assert!(set.grants("user.create"));

        let set = PermissionSet::from_tokens(["*"]);
        assert!(set.grants("user.create"));

        let set = PermissionSet::from_tokens(["user.read"]);
        assert!(!set.grants("user.create"));
    }

    #[test]
    fn empty_tokens_are_never_inserted() {
        let set = PermissionSet::from_tokens(["", "role.read", ""]);
        assert_eq!(set.len(), 1);
        assert!(set.grants("role.read"));

        let mut set = PermissionSet::new();
        set.insert(Permission::new(""));
        assert!(set.is_empty());
    }

    #[test]
    fn grants_any_requires_one_match() {
        let set = PermissionSet::from_tokens(["role.read"]);
        assert!(set.grants_any(["role.delete", "role.read"]));
        assert!(!set.grants_any(["role.delete", "role.update"]));
        // Nothing required means nothing to deny.
        assert!(set.grants_any([]));
    }

    #[test]
    fn set_deduplicates() {
        let set = PermissionSet::from_tokens(["user.read", "user.read", "user.read"]);
        assert_eq!(set.len(), 1);
    }
}
