//! Authentication token lifecycle.
//!
//! This module owns everything about the authentication credential:
//!
//! - [`AuthToken`]: the opaque credential returned by sign-in
//! - [`TokenStore`]: the process-wide holder of the live token
//! - [`TokenStorage`]: durable client-side persistence behind the store
//! - [`AuthEvents`] / [`AuthSubscription`]: observer registry notified on
//!   login-state transitions
//! - [`CredentialStore`]: optional platform credential-manager capability
//!
//! # Lifecycle
//!
//! A token is created on successful sign-in, held in the [`TokenStore`]
//! (mirrored to durable storage), read on every outgoing request by the
//! HTTP layer, and destroyed on explicit sign-out or when the backend
//! reports the credential invalid. Each `set`/`clear` transition notifies
//! subscribed listeners with the new login state.
//!
//! # Example
//!
//! ```rust
//! use saleor_api::auth::{AuthToken, MemoryTokenStorage, TokenStore};
//!
//! let store = TokenStore::new(MemoryTokenStorage::new());
//!
//! let _subscription = store.subscribe(|authenticated| {
//!     println!("login state changed: {authenticated}");
//! });
//!
//! store.set(AuthToken::new("T123"));
//! assert!(store.is_authenticated());
//! ```

mod credentials;
mod events;
mod storage;
mod store;
mod token;

pub use credentials::CredentialStore;
pub use events::{AuthEvents, AuthSubscription};
pub use storage::{FileTokenStorage, MemoryTokenStorage, PersistedToken, TokenStorage};
pub use store::TokenStore;
pub use token::{AuthToken, AUTH_HEADER_NAME};
