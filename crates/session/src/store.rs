//! Persistence for session state.
//!
//! Two blobs with different lifetimes: the navigation snapshot is scoped to
//! one session, while the credential pair outlives process restarts until
//! explicitly cleared. Both sit behind traits so the core never touches the
//! filesystem directly and tests run entirely in memory.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use wayfinder_auth::SessionCredential;

use crate::snapshot::NavSnapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage codec: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("no application data directory available")]
    NoDataDir,
}

/// Session-scoped persistence for the navigation snapshot.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<NavSnapshot>, StoreError>;
    fn save(&self, snapshot: &NavSnapshot) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Longer-lived persistence for the credential pair.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<SessionCredential>, StoreError>;
    fn save(&self, credential: &SessionCredential) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory store: process-lifetime persistence, the default for tests and
/// for embedders that bring their own storage.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    slot: Mutex<Option<T>>,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    fn get(&self) -> Option<T> {
        unpoison(&self.slot).clone()
    }

    fn set(&self, value: &T) {
        *unpoison(&self.slot) = Some(value.clone());
    }

    fn remove(&self) {
        *unpoison(&self.slot) = None;
    }
}

fn unpoison<T>(slot: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SnapshotStore for MemoryStore<NavSnapshot> {
    fn load(&self) -> Result<Option<NavSnapshot>, StoreError> {
        Ok(self.get())
    }

    fn save(&self, snapshot: &NavSnapshot) -> Result<(), StoreError> {
        self.set(snapshot);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.remove();
        Ok(())
    }
}

impl CredentialStore for MemoryStore<SessionCredential> {
    fn load(&self) -> Result<Option<SessionCredential>, StoreError> {
        Ok(self.get())
    }

    fn save(&self, credential: &SessionCredential) -> Result<(), StoreError> {
        self.set(credential);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.remove();
        Ok(())
    }
}

/// JSON-file-backed store under the OS application data directory.
#[derive(Debug)]
pub struct FileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> FileStore<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Store at `{app_data_dir}/wayfinder/<file_name>`.
    pub fn in_data_dir(file_name: &str) -> Result<Self, StoreError> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut home| {
                    home.push(".local");
                    home.push("share");
                    home
                })
            })
            .ok_or(StoreError::NoDataDir)?;

        let mut dir = base;
        dir.push("wayfinder");
        std::fs::create_dir_all(&dir)?;
        dir.push(file_name);
        Ok(Self::new(dir))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read(&self) -> Result<Option<T>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write(&self, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

impl SnapshotStore for FileStore<NavSnapshot> {
    fn load(&self) -> Result<Option<NavSnapshot>, StoreError> {
        self.read()
    }

    fn save(&self, snapshot: &NavSnapshot) -> Result<(), StoreError> {
        self.write(snapshot)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.remove()
    }
}

impl CredentialStore for FileStore<SessionCredential> {
    fn load(&self) -> Result<Option<SessionCredential>, StoreError> {
        self.read()
    }

    fn save(&self, credential: &SessionCredential) -> Result<(), StoreError> {
        self.write(credential)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_auth::{PermissionSet, TokenPair, UserSnapshot};
    use wayfinder_core::UserId;

    fn credential() -> SessionCredential {
        SessionCredential::new(
            TokenPair {
                access_token: "a1".to_string(),
                refresh_token: "r1".to_string(),
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
    fn memory_store_roundtrips() {
        let store = MemoryStore::<SessionCredential>::new();
        assert!(CredentialStore::load(&store).unwrap().is_none());
        CredentialStore::save(&store, &credential()).unwrap();
        assert_eq!(
            CredentialStore::load(&store).unwrap().unwrap().access_token(),
            "a1"
        );
        CredentialStore::clear(&store).unwrap();
        assert!(CredentialStore::load(&store).unwrap().is_none());
    }

    #[test]
    fn file_store_roundtrips_and_tolerates_missing_files() {
        let mut path = std::env::temp_dir();
        path.push(format!("wayfinder-store-{}.json", uuid::Uuid::now_v7()));
        let store = FileStore::<NavSnapshot>::new(path.clone());

        assert!(SnapshotStore::load(&store).unwrap().is_none());
        let snapshot = NavSnapshot::new(PermissionSet::from_tokens(["user.read"]), Vec::new());
        SnapshotStore::save(&store, &snapshot).unwrap();
        let loaded = SnapshotStore::load(&store).unwrap().unwrap();
        assert!(loaded.permissions.grants("user.read"));

        SnapshotStore::clear(&store).unwrap();
        assert!(SnapshotStore::load(&store).unwrap().is_none());
        // Clearing twice is fine.
        SnapshotStore::clear(&store).unwrap();
        let _ = std::fs::remove_file(path);
    }
}
