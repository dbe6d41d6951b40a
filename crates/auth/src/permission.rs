use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "user.create"). Two
/// special forms exist: the universal wildcard `"*"` and prefix wildcards of
/// the form `"user.*"`, which cover every token under that prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }

    /// True when this *stored* token covers `token`.
    ///
    /// Covers on exact match, on the universal wildcard, or when this token
    /// is `prefix.*` and `token` starts with `prefix.`.
    pub fn covers(&self, token: &str) -> bool {
        let stored = self.as_str();
        if stored == token || stored == "*" {
            return true;
        }
        if let Some(prefix) = stored.strip_suffix(".*") {
            return token
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('.'));
        }
        false
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_token_covers_itself() {
        assert!(Permission::new("user.create").covers("user.create"));
        assert!(!Permission::new("user.create").covers("user.read"));
    }

    #[test]
    fn universal_wildcard_covers_everything() {
        let p = Permission::new("*");
        assert!(p.is_wildcard());
        assert!(p.covers("user.create"));
        assert!(p.covers("anything.at.all"));
    }

    #[test]
    fn prefix_wildcard_covers_tokens_under_the_prefix() {
        let p = Permission::new("user.*");
        assert!(p.covers("user.create"));
        assert!(p.covers("user.role.assign"));
        assert!(!p.covers("user"));
        // Prefix match is segment-wise: "user.*" must not cover "userx.create".
        assert!(!p.covers("userx.create"));
    }
}
