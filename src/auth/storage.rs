//! Durable token storage backends.
//!
//! The [`TokenStore`](crate::auth::TokenStore) mirrors the live token to a
//! [`TokenStorage`] backend so it survives process restarts. Two backends
//! are provided: [`FileTokenStorage`] for real deployments and
//! [`MemoryTokenStorage`] for tests.
//!
//! Storage is assumed synchronous and always available: backends log I/O
//! failures via `tracing` instead of surfacing them, so a broken disk never
//! fails a sign-in.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthToken;

/// The durable record a token is persisted as.
///
/// Besides the token itself, the record carries the time it was saved so
/// deployments can expire stale credentials out of band.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedToken {
    /// The raw token value.
    pub token: String,
    /// When the token was written to storage.
    pub saved_at: DateTime<Utc>,
}

impl PersistedToken {
    /// Creates a record for the given token, stamped with the current time.
    #[must_use]
    pub fn new(token: &AuthToken) -> Self {
        Self {
            token: token.as_str().to_string(),
            saved_at: Utc::now(),
        }
    }
}

/// Durable client-side storage for the authentication token.
///
/// Implementations must be cheap to call: `load` runs at most once per
/// process (the store caches the answer) and `save`/`delete` run once per
/// sign-in/sign-out.
pub trait TokenStorage: Send + Sync {
    /// Reads the persisted record, if one exists.
    fn load(&self) -> Option<PersistedToken>;

    /// Writes the record, replacing any previous one.
    fn save(&self, record: &PersistedToken);

    /// Removes the persisted record, if any.
    fn delete(&self);
}

/// File-backed token storage.
///
/// The record is stored as a single JSON document at the given path. Parent
/// directories are created on the first write.
///
/// # Example
///
/// ```rust,no_run
/// use saleor_api::auth::FileTokenStorage;
///
/// let storage = FileTokenStorage::new("/var/lib/my-app/token.json");
/// ```
#[derive(Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates storage backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path the record is stored at.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Option<PersistedToken> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "discarding unreadable token record"
                );
                None
            }
        }
    }

    fn save(&self, record: &PersistedToken) {
        if let Some(parent) = self.path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "failed to create token storage directory"
                );
                return;
            }
        }

        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(error) = fs::write(&self.path, json) {
                    tracing::warn!(
                        path = %self.path.display(),
                        %error,
                        "failed to persist token"
                    );
                }
            }
            Err(error) => {
                tracing::warn!(%error, "failed to serialize token record");
            }
        }
    }

    fn delete(&self) {
        if let Err(error) = fs::remove_file(&self.path) {
            if error.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "failed to delete persisted token"
                );
            }
        }
    }
}

/// In-memory token storage for tests.
///
/// Behaves like [`FileTokenStorage`] without touching the filesystem, so
/// tests can swap it in and inspect what was persisted.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    record: Mutex<Option<PersistedToken>>,
}

impl MemoryTokenStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-seeded with a token, as if a previous process
    /// had persisted it.
    #[must_use]
    pub fn with_token(token: &AuthToken) -> Self {
        Self {
            record: Mutex::new(Some(PersistedToken::new(token))),
        }
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<PersistedToken> {
        self.record.lock().expect("token storage lock").clone()
    }

    fn save(&self, record: &PersistedToken) {
        *self.record.lock().expect("token storage lock") = Some(record.clone());
    }

    fn delete(&self) {
        *self.record.lock().expect("token storage lock") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let storage = MemoryTokenStorage::new();
        assert!(storage.load().is_none());

        let record = PersistedToken::new(&AuthToken::new("T123"));
        storage.save(&record);

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.token, "T123");
    }

    #[test]
    fn test_memory_storage_delete() {
        let storage = MemoryTokenStorage::with_token(&AuthToken::new("T123"));
        assert!(storage.load().is_some());

        storage.delete();
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("token.json"));

        assert!(storage.load().is_none());

        let record = PersistedToken::new(&AuthToken::new("T123"));
        storage.save(&record);

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.token, "T123");
        assert_eq!(loaded.saved_at, record.saved_at);
    }

    #[test]
    fn test_file_storage_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("token.json"));

        storage.save(&PersistedToken::new(&AuthToken::new("T123")));
        storage.delete();
        assert!(storage.load().is_none());

        // Deleting an absent record is not an error
        storage.delete();
    }

    #[test]
    fn test_file_storage_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested/dir/token.json"));

        storage.save(&PersistedToken::new(&AuthToken::new("T123")));
        assert!(storage.load().is_some());
    }

    #[test]
    fn test_file_storage_discards_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();

        let storage = FileTokenStorage::new(&path);
        assert!(storage.load().is_none());
    }
}
