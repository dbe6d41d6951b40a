use serde::{Deserialize, Serialize};

/// Lifecycle of the session's synthesized navigation.
///
/// `Unset` on cold start or after reset; `Generating` while the menu fetch
/// and synthesis are in flight; `Ready` once a route tree has been
/// committed. Regresses to `Unset` on logout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationState {
    #[default]
    Unset,
    Generating,
    Ready,
}

impl NavigationState {
    pub fn is_ready(&self) -> bool {
        matches!(self, NavigationState::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_start_is_unset() {
        assert_eq!(NavigationState::default(), NavigationState::Unset);
        assert!(!NavigationState::default().is_ready());
    }
}
