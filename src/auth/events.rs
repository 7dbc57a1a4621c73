//! Auth event notification.
//!
//! This module provides [`AuthEvents`], an explicit observer registry that
//! replaces a host-wide event bus: listeners subscribe with a callback and
//! are notified synchronously whenever the login state transitions.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use saleor_api::auth::AuthEvents;
//!
//! let events = AuthEvents::new();
//! let seen = Arc::new(AtomicBool::new(false));
//!
//! let seen_clone = Arc::clone(&seen);
//! let subscription = events.subscribe(move |authenticated| {
//!     seen_clone.store(authenticated, Ordering::SeqCst);
//! });
//!
//! events.emit(true);
//! assert!(seen.load(Ordering::SeqCst));
//!
//! subscription.unsubscribe();
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Listener = Arc<dyn Fn(bool) + Send + Sync>;
type ListenerMap = Mutex<HashMap<u64, Listener>>;

/// Observer registry for login-state changes.
///
/// The [`TokenStore`](crate::auth::TokenStore) owns one of these and emits
/// on every `set`/`clear` transition. Listeners are invoked synchronously,
/// outside the registry lock, in no guaranteed order relative to each other.
#[derive(Default)]
pub struct AuthEvents {
    listeners: Arc<ListenerMap>,
    next_id: AtomicU64,
}

impl AuthEvents {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback to be invoked with the new login state on
    /// every transition.
    ///
    /// The returned [`AuthSubscription`] unregisters the callback when
    /// dropped; hold on to it for as long as notifications are wanted.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, callback: F) -> AuthSubscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("auth listener lock")
            .insert(id, Arc::new(callback));

        AuthSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Notifies every registered listener of the new login state.
    ///
    /// Listeners registered or removed while an emit is in progress take
    /// effect from the next emit.
    pub fn emit(&self, authenticated: bool) {
        // Snapshot under the lock, invoke outside it, so a listener can
        // subscribe or unsubscribe without deadlocking.
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .expect("auth listener lock")
            .values()
            .cloned()
            .collect();

        tracing::debug!(authenticated, listeners = snapshot.len(), "auth event");

        for listener in snapshot {
            listener(authenticated);
        }
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().expect("auth listener lock").len()
    }
}

impl std::fmt::Debug for AuthEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEvents")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for a registered auth listener.
///
/// The listener stays registered for the lifetime of this guard and is
/// removed when the guard is dropped or [`unsubscribe`](Self::unsubscribe)
/// is called.
#[derive(Debug)]
pub struct AuthSubscription {
    id: u64,
    listeners: Weak<ListenerMap>,
}

impl AuthSubscription {
    /// Unregisters the listener.
    ///
    /// Equivalent to dropping the guard; provided for call sites that want
    /// to make the unregistration explicit.
    pub fn unsubscribe(self) {
        // Drop impl does the work.
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .lock()
                .expect("auth listener lock")
                .remove(&self.id);
        }
    }
}
