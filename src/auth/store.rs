//! Process-wide token store.
//!
//! [`TokenStore`] is the sole owner of the live authentication token. It
//! keeps the token in process memory, mirrors it to a durable
//! [`TokenStorage`] backend, and notifies [`AuthEvents`] listeners on every
//! login-state transition.
//!
//! # Example
//!
//! ```rust
//! use saleor_api::auth::{AuthToken, MemoryTokenStorage, TokenStore};
//!
//! let store = TokenStore::new(MemoryTokenStorage::new());
//!
//! assert!(store.get().is_none());
//!
//! store.set(AuthToken::new("T123"));
//! assert_eq!(store.get().unwrap().as_str(), "T123");
//!
//! store.clear();
//! assert!(store.get().is_none());
//! ```

use std::sync::RwLock;

use crate::auth::events::{AuthEvents, AuthSubscription};
use crate::auth::storage::{PersistedToken, TokenStorage};
use crate::auth::AuthToken;

/// In-memory view of the token, tracking whether durable storage has been
/// consulted yet.
#[derive(Debug)]
enum TokenState {
    /// Durable storage has not been read; memory holds no answer yet.
    Unloaded,
    /// The authoritative in-process state, possibly "no token".
    Loaded(Option<AuthToken>),
}

/// Holder of the current authentication token.
///
/// Exactly one token is live per store at a time. Reads fall back to the
/// durable storage backend once, after which process memory is
/// authoritative. Writes go to both.
///
/// # Concurrency
///
/// All access goes through an interior [`RwLock`], giving atomic
/// replace-on-write semantics on multi-threaded runtimes. Event listeners
/// are invoked synchronously from [`set`](Self::set)/[`clear`](Self::clear),
/// outside the lock.
///
/// # Thread Safety
///
/// `TokenStore` is `Send + Sync`; share it via `Arc`.
pub struct TokenStore {
    state: RwLock<TokenState>,
    storage: Box<dyn TokenStorage>,
    events: AuthEvents,
}

// Verify TokenStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TokenStore>();
};

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &matches!(
                &*self.state.read().expect("token store lock"),
                TokenState::Loaded(Some(_))
            ))
            .finish_non_exhaustive()
    }
}

impl TokenStore {
    /// Creates a store backed by the given durable storage.
    #[must_use]
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            state: RwLock::new(TokenState::Unloaded),
            storage: Box::new(storage),
            events: AuthEvents::new(),
        }
    }

    /// Returns the current token, if any.
    ///
    /// On the first call after construction, falls back to durable storage
    /// and caches the answer (including "absent"); afterwards process
    /// memory is authoritative.
    #[must_use]
    pub fn get(&self) -> Option<AuthToken> {
        if let TokenState::Loaded(token) = &*self.state.read().expect("token store lock") {
            return token.clone();
        }

        let mut state = self.state.write().expect("token store lock");
        // Another thread may have loaded while we waited for the write lock.
        if let TokenState::Loaded(token) = &*state {
            return token.clone();
        }

        let token = self
            .storage
            .load()
            .map(|record| AuthToken::new(record.token));
        *state = TokenState::Loaded(token.clone());
        token
    }

    /// Stores a token in process memory and durable storage, then notifies
    /// listeners with `authenticated = true`.
    pub fn set(&self, token: AuthToken) {
        {
            let mut state = self.state.write().expect("token store lock");
            self.storage.save(&PersistedToken::new(&token));
            *state = TokenState::Loaded(Some(token));
        }
        self.events.emit(true);
    }

    /// Removes the token from process memory and durable storage.
    ///
    /// Listeners are notified with `authenticated = false` only when a
    /// token was actually present, so repeated clears produce a single
    /// notification.
    pub fn clear(&self) {
        let had_token = {
            let mut state = self.state.write().expect("token store lock");
            let had_token = match &*state {
                TokenState::Unloaded => self.storage.load().is_some(),
                TokenState::Loaded(token) => token.is_some(),
            };
            self.storage.delete();
            *state = TokenState::Loaded(None);
            had_token
        };

        if had_token {
            self.events.emit(false);
        }
    }

    /// Returns `true` if a token is currently present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Registers a listener for login-state transitions.
    ///
    /// The callback receives the new state (`true` after [`set`](Self::set),
    /// `false` after a [`clear`](Self::clear) that removed a token). The
    /// returned guard unregisters the listener when dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, callback: F) -> AuthSubscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.events.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::storage::MemoryTokenStorage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_token_round_trip() {
        let store = TokenStore::new(MemoryTokenStorage::new());

        store.set(AuthToken::new("T123"));
        assert_eq!(store.get().unwrap().as_str(), "T123");

        store.set(AuthToken::new("T456"));
        assert_eq!(store.get().unwrap().as_str(), "T456");
    }

    #[test]
    fn test_clear_removes_token() {
        let store = TokenStore::new(MemoryTokenStorage::new());

        store.set(AuthToken::new("T123"));
        store.clear();

        assert!(store.get().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_get_falls_back_to_durable_storage() {
        let storage = MemoryTokenStorage::with_token(&AuthToken::new("persisted"));
        let store = TokenStore::new(storage);

        // Cold store: the token comes from durable storage.
        assert_eq!(store.get().unwrap().as_str(), "persisted");
    }

    #[test]
    fn test_absent_storage_answer_is_cached() {
        let store = TokenStore::new(MemoryTokenStorage::new());

        assert!(store.get().is_none());
        // A second read must not re-consult storage with a different answer.
        assert!(store.get().is_none());
    }

    #[test]
    fn test_set_mirrors_to_durable_storage() {
        let store = TokenStore::new(MemoryTokenStorage::new());
        store.set(AuthToken::new("T123"));

        // A fresh store over equivalent storage would see the token; here we
        // verify through clear() which consults the same backend.
        store.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_set_notifies_listeners_with_true() {
        let store = TokenStore::new(MemoryTokenStorage::new());
        let states = Arc::new(Mutex::new(Vec::new()));

        let states_clone = Arc::clone(&states);
        let _subscription = store.subscribe(move |authenticated| {
            states_clone.lock().unwrap().push(authenticated);
        });

        store.set(AuthToken::new("T123"));
        assert_eq!(*states.lock().unwrap(), vec![true]);
    }

    #[test]
    fn test_clear_notifies_listeners_exactly_once() {
        let store = TokenStore::new(MemoryTokenStorage::new());
        store.set(AuthToken::new("T123"));

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let _subscription = store.subscribe(move |authenticated| {
            assert!(!authenticated);
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.clear();
        store.clear();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_on_empty_store_does_not_notify() {
        let store = TokenStore::new(MemoryTokenStorage::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = Arc::clone(&calls);
        let _subscription = store.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        store.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clear_on_cold_store_with_persisted_token_notifies() {
        let storage = MemoryTokenStorage::with_token(&AuthToken::new("persisted"));
        let store = TokenStore::new(storage);

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let _subscription = store.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        // The store has never been read, but durable storage holds a token,
        // so this clear is a real transition.
        store.clear();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.get().is_none());
    }

    #[test]
    fn test_is_authenticated_tracks_token_presence() {
        let store = TokenStore::new(MemoryTokenStorage::new());

        assert!(!store.is_authenticated());
        store.set(AuthToken::new("T123"));
        assert!(store.is_authenticated());
        store.clear();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokenStore>();
    }
}
