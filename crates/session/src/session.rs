use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

use wayfinder_auth::{PermissionSet, SessionCredential, TokenPair, UserSnapshot};

use crate::snapshot::NavSnapshot;
use crate::state::NavigationState;
use crate::store::{CredentialStore, MemoryStore, SnapshotStore};

/// The single owned session context.
///
/// Holds the shared mutable singletons: the credential slot, the navigation
/// lifecycle state, and the committed permission set. All locks are released
/// before any await point; callers re-read after suspension instead of
/// caching copies.
pub struct Session {
    credential: Mutex<Option<SessionCredential>>,
    /// Bumped on every credential install/replace/clear. Lets the request
    /// layer detect that another flow already re-authenticated while it was
    /// waiting, so refreshes stay single-flight.
    credential_generation: AtomicU64,
    nav_state: Mutex<NavigationState>,
    permissions: Mutex<PermissionSet>,
    credential_store: Arc<dyn CredentialStore>,
    snapshot_store: Arc<dyn SnapshotStore>,
}

impl Session {
    /// Open a session over the given stores. A credential persisted by an
    /// earlier process is picked up here; the navigation state always starts
    /// `Unset` because route registration never survives the process.
    pub fn new(
        credential_store: Arc<dyn CredentialStore>,
        snapshot_store: Arc<dyn SnapshotStore>,
    ) -> Self {
        let credential = match credential_store.load() {
            Ok(credential) => credential,
            Err(err) => {
                warn!(error = %err, "failed to load persisted credential; starting unauthenticated");
                None
            }
        };
        Self {
            credential: Mutex::new(credential),
            credential_generation: AtomicU64::new(0),
            nav_state: Mutex::new(NavigationState::Unset),
            permissions: Mutex::new(PermissionSet::new()),
            credential_store,
            snapshot_store,
        }
    }

    /// Session backed by in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryStore::<SessionCredential>::new()),
            Arc::new(MemoryStore::<NavSnapshot>::new()),
        )
    }

    // ─── credential ────────────────────────────────────────────────────

    pub fn is_authenticated(&self) -> bool {
        lock(&self.credential).is_some()
    }

    pub fn credential(&self) -> Option<SessionCredential> {
        lock(&self.credential).clone()
    }

    pub fn access_token(&self) -> Option<String> {
        lock(&self.credential)
            .as_ref()
            .map(|c| c.access_token().to_string())
    }

    pub fn refresh_token(&self) -> Option<String> {
        lock(&self.credential)
            .as_ref()
            .map(|c| c.refresh_token().to_string())
    }

    pub fn user(&self) -> Option<UserSnapshot> {
        lock(&self.credential).as_ref().map(|c| c.user.clone())
    }

    pub fn credential_generation(&self) -> u64 {
        self.credential_generation.load(Ordering::SeqCst)
    }

    /// Install a freshly issued credential (login).
    pub fn install_credential(&self, credential: SessionCredential) {
        self.persist_credential(&credential);
        *lock(&self.credential) = Some(credential);
        self.credential_generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Replace the token pair wholesale (refresh). Returns false when no
    /// credential is installed, which means the session was cleared while
    /// the refresh was in flight.
    pub fn replace_tokens(&self, tokens: TokenPair) -> bool {
        let mut slot = lock(&self.credential);
        let Some(credential) = slot.as_mut() else {
            return false;
        };
        credential.replace_tokens(tokens);
        let snapshot = credential.clone();
        drop(slot);
        self.persist_credential(&snapshot);
        self.credential_generation.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// Clear every piece of session state: credential, permissions,
    /// navigation lifecycle, and both persisted blobs.
    pub fn clear(&self) {
        *lock(&self.credential) = None;
        *lock(&self.permissions) = PermissionSet::new();
        *lock(&self.nav_state) = NavigationState::Unset;
        self.credential_generation.fetch_add(1, Ordering::SeqCst);
        if let Err(err) = self.credential_store.clear() {
            warn!(error = %err, "failed to clear persisted credential");
        }
        if let Err(err) = self.snapshot_store.clear() {
            warn!(error = %err, "failed to clear persisted navigation snapshot");
        }
    }

    fn persist_credential(&self, credential: &SessionCredential) {
        if let Err(err) = self.credential_store.save(credential) {
            warn!(error = %err, "failed to persist credential; continuing in memory");
        }
    }

    // ─── navigation lifecycle ──────────────────────────────────────────

    pub fn nav_state(&self) -> NavigationState {
        *lock(&self.nav_state)
    }

    pub fn set_nav_state(&self, state: NavigationState) {
        *lock(&self.nav_state) = state;
    }

    // ─── permissions ───────────────────────────────────────────────────

    pub fn permissions(&self) -> PermissionSet {
        lock(&self.permissions).clone()
    }

    pub fn grants(&self, token: &str) -> bool {
        lock(&self.permissions).grants(token)
    }

    pub fn set_permissions(&self, permissions: PermissionSet) {
        *lock(&self.permissions) = permissions;
    }

    // ─── snapshot ──────────────────────────────────────────────────────

    pub fn save_snapshot(&self, snapshot: &NavSnapshot) {
        if let Err(err) = self.snapshot_store.save(snapshot) {
            warn!(error = %err, "failed to persist navigation snapshot");
        }
    }

    pub fn load_snapshot(&self) -> Option<NavSnapshot> {
        match self.snapshot_store.load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "failed to load navigation snapshot");
                None
            }
        }
    }
}

fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::UserId;

    fn credential(access: &str, refresh: &str) -> SessionCredential {
        SessionCredential::new(
            TokenPair {
                access_token: access.to_string(),
                refresh_token: refresh.to_string(),
                expires_in: 1800,
                refresh_expires_in: 604_800,
            },
            UserSnapshot {
                user_id: UserId::new(7),
                username: "alice".to_string(),
                nickname: String::new(),
                email: None,
                avatar: None,
            },
        )
    }

    #[test]
    fn install_replace_clear_lifecycle() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());

        session.install_credential(credential("a1", "r1"));
        assert!(session.is_authenticated());
        let g1 = session.credential_generation();

        assert!(session.replace_tokens(TokenPair {
            access_token: "a2".to_string(),
            refresh_token: "r2".to_string(),
            expires_in: 1800,
            refresh_expires_in: 604_800,
        }));
        assert_eq!(session.access_token().as_deref(), Some("a2"));
        assert!(session.credential_generation() > g1);

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.nav_state(), NavigationState::Unset);
        assert!(session.permissions().is_empty());
    }

    #[test]
    fn replace_tokens_without_credential_reports_cleared_session() {
        let session = Session::in_memory();
        assert!(!session.replace_tokens(TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_in: 0,
            refresh_expires_in: 0,
        }));
    }

    #[test]
    fn persisted_credential_survives_a_new_session_over_the_same_store() {
        let credential_store = Arc::new(MemoryStore::<SessionCredential>::new());
        let snapshot_store = Arc::new(MemoryStore::<NavSnapshot>::new());

        let session = Session::new(credential_store.clone(), snapshot_store.clone());
        session.install_credential(credential("a1", "r1"));
        drop(session);

        let revived = Session::new(credential_store, snapshot_store);
        assert!(revived.is_authenticated());
        assert_eq!(revived.access_token().as_deref(), Some("a1"));
        // Route registration is per process: always Unset after a restart.
        assert_eq!(revived.nav_state(), NavigationState::Unset);
    }

    #[test]
    fn clear_wipes_the_persisted_snapshot_too() {
        let session = Session::in_memory();
        session.save_snapshot(&NavSnapshot::new(PermissionSet::new(), Vec::new()));
        assert!(session.load_snapshot().is_some());
        session.clear();
        assert!(session.load_snapshot().is_none());
    }
}
