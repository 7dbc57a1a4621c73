//! # Saleor API Client for Rust
//!
//! A typed client for the Saleor GraphQL e-commerce API, providing
//! query/mutation dispatch with unified error normalization and a managed
//! authentication token lifecycle.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`SaleorConfig`] and [`SaleorConfigBuilder`]
//! - A fixed catalog of operations via [`api::Operation`]
//! - One-shot dispatch ([`api::SaleorApi::fire_query`]) and live
//!   subscriptions ([`api::SaleorApi::watch_query`])
//! - Unified error normalization merging transport-level and domain-level
//!   failures into one result shape
//! - Authentication token lifecycle management via [`auth::TokenStore`],
//!   with durable persistence and login-state notifications
//! - Async HTTP transport with retry logic for transient failures
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use saleor_api::{ApiEndpoint, SaleorConfig};
//! use saleor_api::api::SaleorApi;
//! use saleor_api::auth::{MemoryTokenStorage, TokenStore};
//!
//! // Create configuration using the builder pattern
//! let config = SaleorConfig::builder()
//!     .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap())
//!     .build()
//!     .unwrap();
//!
//! // The token store is injected, so tests can swap in an in-memory fake
//! let token_store = Arc::new(TokenStore::new(MemoryTokenStorage::new()));
//! let api = SaleorApi::new(&config, token_store);
//! assert!(!api.is_logged_in());
//! ```
//!
//! ## Firing Operations
//!
//! Every operation resolves to a single success-or-error outcome: domain
//! errors embedded in successful payloads and transport errors from the
//! protocol layer surface through the same [`api::ApiError`].
//!
//! ```rust,ignore
//! use saleor_api::api::{Operation, QueryOptions};
//!
//! let product = api.fire_query(
//!     Operation::ProductDetails,
//!     Some(serde_json::json!({"id": "UHJvZHVjdDo3Mg=="})),
//!     QueryOptions::default(),
//!     |data| data.and_then(|value| value.get("product")).cloned(),
//! ).await?;
//! ```
//!
//! ## Watched Queries
//!
//! A watched query re-emits as results arrive: any cached result first,
//! then the network result, then again on every refetch.
//!
//! ```rust,ignore
//! use saleor_api::api::{Operation, QueryOptions, WatchHandlers};
//!
//! let watch = api.watch_query(
//!     Operation::UserDetails,
//!     None,
//!     QueryOptions::default(),
//!     |data| data.and_then(|value| value.get("me")).cloned(),
//!     WatchHandlers::new(|me| println!("user updated: {me:?}"))
//!         .on_error(|error| eprintln!("watch failed: {error}"))
//!         .on_complete(|| println!("first result delivered")),
//! );
//!
//! // Re-run with fresh variables; cached match surfaces first
//! let fresh = watch.refetch(None).await?;
//!
//! // Dropping the handle unsubscribes
//! watch.unsubscribe();
//! ```
//!
//! ## Signing In
//!
//! ```rust,ignore
//! use saleor_api::api::{SignInOptions, SignInVariables};
//!
//! let payload = api.sign_in(
//!     SignInVariables::new("user@example.com", "password"),
//!     SignInOptions::default(),
//! ).await?;
//!
//! assert!(api.is_logged_in());
//! ```
//!
//! On success the returned token is held in the [`auth::TokenStore`] and
//! attached to every subsequent request as `Authorization: JWT <token>`.
//! When the backend later reports the credential invalid, the token is
//! cleared and auth listeners are notified:
//!
//! ```rust,ignore
//! let subscription = api.attach_auth_listener(|authenticated| {
//!     if !authenticated {
//!         println!("signed out");
//!     }
//! });
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: The token store is an explicit object passed by
//!   handle to the constructors
//! - **One result shape**: Callers branch on the unified outcome, never on
//!   raw transport/domain error shapes
//! - **Fail-fast validation**: Configuration newtypes validate on
//!   construction
//! - **Thread-safe**: All shared types are `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio async runtime

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{ApiEndpoint, SaleorConfig, SaleorConfigBuilder};
pub use error::ConfigError;

// Re-export the dispatch layer's primary types
pub use api::{ApiError, Operation, QueryOptions, SaleorApi, UnifiedError, WatchHandlers};

// Re-export auth lifecycle types
pub use auth::{AuthSubscription, AuthToken, TokenStore};
