//! The dispatch layer.
//!
//! [`SaleorApi`] is the public surface of the crate: it fires operations
//! from the catalog through the transport pipeline, passes every result
//! through the error normalizer, and owns sign-in orchestration and
//! auth-event subscription.
//!
//! # Overview
//!
//! - [`SaleorApi::fire_query`]: one-shot execution resolving to a
//!   normalized outcome
//! - [`SaleorApi::watch_query`]: live subscriptions re-emitting on cache
//!   and refetch updates
//! - [`SaleorApi::sign_in`]: token acquisition and storage
//! - [`SaleorApi::attach_auth_listener`] / [`SaleorApi::is_logged_in`]:
//!   login-state observation
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use saleor_api::api::{Operation, QueryOptions, SaleorApi, SignInOptions, SignInVariables};
//! use saleor_api::auth::{MemoryTokenStorage, TokenStore};
//! use saleor_api::{ApiEndpoint, SaleorConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SaleorConfig::builder()
//!     .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/")?)
//!     .build()?;
//! let token_store = Arc::new(TokenStore::new(MemoryTokenStorage::new()));
//! let api = SaleorApi::new(&config, token_store);
//!
//! let payload = api
//!     .sign_in(
//!         SignInVariables::new("admin@example.com", "admin"),
//!         SignInOptions::default(),
//!     )
//!     .await?;
//! assert!(api.is_logged_in());
//!
//! let product = api
//!     .fire_query(
//!         Operation::ProductDetails,
//!         Some(serde_json::json!({"id": "UHJvZHVjdDo3Mg=="})),
//!         QueryOptions::default(),
//!         |data| data.and_then(|value| value.get("product")).cloned(),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
mod normalize;
mod operations;
mod options;
mod watch;

pub use cache::{CacheKey, QueryCache};
pub use error::{ApiError, UnifiedError};
pub use normalize::{collect_domain_errors, normalize, UnifiedOutcome};
pub use operations::{Operation, OperationKind};
pub use options::{FetchPolicy, QueryOptions};
pub use watch::{WatchHandlers, WatchedQuery};

use std::future::Future;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::auth::{
    AuthSubscription, AuthToken, CredentialStore, TokenStore,
};
use crate::clients::graphql::{DomainError, GraphqlResponse};
use crate::clients::{GraphqlClient, GraphqlError};
use crate::config::SaleorConfig;

/// Variables for the sign-in mutation.
#[derive(Clone, Debug)]
pub struct SignInVariables {
    /// The account email address.
    pub email: String,
    /// The account password.
    pub password: String,
}

impl SignInVariables {
    /// Creates sign-in variables.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Per-call options for [`SaleorApi::sign_in`].
#[derive(Default)]
pub struct SignInOptions {
    /// Hook invoked with the payload after a successful sign-in, once the
    /// token has been stored.
    pub update: Option<Box<dyn FnOnce(&SignInPayload) + Send>>,
}

impl SignInOptions {
    /// Sets the post-sign-in hook.
    #[must_use]
    pub fn update(mut self, update: impl FnOnce(&SignInPayload) + Send + 'static) -> Self {
        self.update = Some(Box::new(update));
        self
    }
}

impl std::fmt::Debug for SignInOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInOptions")
            .field("update", &self.update.is_some())
            .finish()
    }
}

/// The result of the sign-in mutation.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SignInPayload {
    /// The issued token; absent when sign-in failed.
    pub token: Option<String>,
    /// The signed-in user, as returned by the backend.
    #[serde(default)]
    pub user: Option<Value>,
    /// Domain errors reported by the mutation.
    #[serde(default)]
    pub errors: Vec<DomainError>,
}

/// The public dispatch layer over a Saleor GraphQL backend.
///
/// Owns no persistent state of its own: every call is independent except
/// for the shared transport pipeline, token store, and query cache.
///
/// # Thread Safety
///
/// `SaleorApi` is `Send + Sync`; clone it freely or share it via `Arc`.
#[derive(Clone)]
pub struct SaleorApi {
    client: GraphqlClient,
    token_store: Arc<TokenStore>,
    cache: Arc<QueryCache>,
    credentials: Option<Arc<dyn CredentialStore>>,
    default_tries: u32,
}

// Verify SaleorApi is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SaleorApi>();
};

impl std::fmt::Debug for SaleorApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaleorApi")
            .field("client", &self.client)
            .field("token_store", &self.token_store)
            .field("credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl SaleorApi {
    /// Creates a dispatch layer over the configured endpoint.
    ///
    /// The token store is injected by handle: the transport pipeline reads
    /// it on every request and the invalidation detector clears it, while
    /// callers keep their own reference for direct lifecycle control.
    #[must_use]
    pub fn new(config: &SaleorConfig, token_store: Arc<TokenStore>) -> Self {
        Self {
            client: GraphqlClient::new(config, Arc::clone(&token_store)),
            token_store,
            cache: Arc::new(QueryCache::new()),
            credentials: None,
            default_tries: config.tries(),
        }
    }

    /// Attaches a platform credential-storage capability.
    ///
    /// When present, a successful sign-in opportunistically stores the
    /// credentials; absence is not an error.
    #[must_use]
    pub fn with_credential_store(mut self, credentials: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Returns the shared query cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Executes a one-shot operation and normalizes the outcome.
    ///
    /// With [`FetchPolicy::CacheFirst`], a cache hit is served without
    /// touching the network. Successful network payloads of queries are
    /// written back to the cache; mutations never touch it.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Request`] when the transport pipeline fails (network
    ///   error, retry exhaustion); these bypass normalization
    /// - [`ApiError::Response`] when the normalized outcome is an error
    pub async fn fire_query<T, F>(
        &self,
        operation: Operation,
        variables: Option<Value>,
        options: QueryOptions,
        map_fn: F,
    ) -> Result<T, ApiError>
    where
        F: FnOnce(Option<&Value>) -> T,
    {
        let cacheable = operation.kind() == OperationKind::Query;
        let key = CacheKey::new(operation, variables.as_ref());

        if cacheable && options.fetch_policy == FetchPolicy::CacheFirst {
            if let Some(cached) = self.cache.get(&key) {
                tracing::debug!(operation = operation.name(), "serving cached result");
                return Ok(map_fn(Some(&cached)));
            }
        }

        let tries = options.tries.max(self.default_tries);
        let request = self.client.run(operation.document(), variables, tries);

        self.fire_promise(request, |data| {
            if cacheable {
                if let Some(data) = data {
                    self.cache.set(key, data.clone());
                }
            }
            map_fn(data)
        })
        .await
    }

    /// Shared plumbing: awaits a raw-result future and normalizes it.
    ///
    /// Any failure from awaiting the future itself (network failure,
    /// retry exhaustion, undecodable body) rejects directly, bypassing
    /// normalization.
    ///
    /// # Errors
    ///
    /// See [`fire_query`](Self::fire_query).
    pub async fn fire_promise<T, F, Fut>(&self, request: Fut, map_fn: F) -> Result<T, ApiError>
    where
        F: FnOnce(Option<&Value>) -> T,
        Fut: Future<Output = Result<GraphqlResponse, GraphqlError>>,
    {
        let raw = request.await?;
        normalize(map_fn, raw.data.as_ref(), &raw.errors)
            .into_result()
            .map_err(ApiError::Response)
    }

    /// Starts a watched-query subscription.
    ///
    /// Every emission passes through the normalizer and invokes exactly
    /// one of the supplied handlers; `on_complete` fires once after the
    /// first successful update. The returned handle controls the
    /// subscription ([`refetch`](WatchedQuery::refetch),
    /// [`set_options`](WatchedQuery::set_options)) and unsubscribes when
    /// dropped.
    pub fn watch_query<T, F>(
        &self,
        operation: Operation,
        variables: Option<Value>,
        options: QueryOptions,
        map_fn: F,
        handlers: WatchHandlers<T>,
    ) -> WatchedQuery<T>
    where
        T: Send + 'static,
        F: Fn(Option<&Value>) -> T + Send + Sync + 'static,
    {
        WatchedQuery::spawn(
            self.client.clone(),
            Arc::clone(&self.cache),
            operation,
            variables,
            options,
            Arc::new(map_fn),
            handlers,
        )
    }

    /// Signs in with email and password.
    ///
    /// Fires the sign-in mutation; on success stores the returned token in
    /// the token store (notifying auth listeners), opportunistically
    /// persists the credentials if a [`CredentialStore`] capability was
    /// attached, and finally invokes the caller's `update` hook if
    /// supplied. Resolves with the sign-in payload.
    ///
    /// # Errors
    ///
    /// Rejects on **any** error, network or domain. A domain failure
    /// leaves the token store untouched and surfaces the mutation's error
    /// entries as the unified error's `extra_info`.
    pub async fn sign_in(
        &self,
        variables: SignInVariables,
        options: SignInOptions,
    ) -> Result<SignInPayload, ApiError> {
        let request = self.client.run(
            Operation::TokenCreate.document(),
            Some(serde_json::json!({
                "email": variables.email.clone(),
                "password": variables.password.clone(),
            })),
            self.default_tries,
        );

        let payload: SignInPayload = self
            .fire_promise(request, |data| {
                data.and_then(|value| value.get("tokenCreate"))
                    .and_then(|node| serde_json::from_value(node.clone()).ok())
                    .unwrap_or_default()
            })
            .await?;

        // Sign-in is all-or-nothing: a domain failure must not leave a
        // half-authenticated client behind.
        if !payload.errors.is_empty() {
            return Err(ApiError::Response(UnifiedError::from_domain(
                payload.errors,
            )));
        }

        let Some(token) = payload.token.as_deref() else {
            return Err(ApiError::Response(UnifiedError::from_domain(vec![
                DomainError {
                    field: None,
                    message: "Sign-in returned no token".to_string(),
                },
            ])));
        };

        self.token_store.set(AuthToken::new(token));

        if let Some(credentials) = &self.credentials {
            credentials.store(&variables.email, &variables.password);
        }

        if let Some(update) = options.update {
            update(&payload);
        }

        Ok(payload)
    }

    /// Signs out, destroying the stored token and notifying listeners.
    pub fn sign_out(&self) {
        self.token_store.clear();
        self.cache.clear();
    }

    /// Registers a callback for login-state changes.
    ///
    /// The callback receives the current login state whenever the auth
    /// event fires. The returned guard unregisters it when dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn attach_auth_listener<F>(&self, callback: F) -> AuthSubscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.token_store.subscribe(callback)
    }

    /// Returns `true` if a token is currently present.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token_store.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStorage;
    use crate::config::ApiEndpoint;

    fn create_test_api() -> SaleorApi {
        let config = SaleorConfig::builder()
            .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap())
            .build()
            .unwrap();
        SaleorApi::new(&config, Arc::new(TokenStore::new(MemoryTokenStorage::new())))
    }

    #[test]
    fn test_api_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SaleorApi>();
    }

    #[test]
    fn test_is_logged_in_tracks_token_store() {
        let token_store = Arc::new(TokenStore::new(MemoryTokenStorage::new()));
        let config = SaleorConfig::builder()
            .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap())
            .build()
            .unwrap();
        let api = SaleorApi::new(&config, Arc::clone(&token_store));

        assert!(!api.is_logged_in());
        token_store.set(AuthToken::new("T123"));
        assert!(api.is_logged_in());
    }

    #[test]
    fn test_sign_out_clears_token_and_cache() {
        let token_store = Arc::new(TokenStore::new(MemoryTokenStorage::new()));
        let config = SaleorConfig::builder()
            .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap())
            .build()
            .unwrap();
        let api = SaleorApi::new(&config, Arc::clone(&token_store));

        token_store.set(AuthToken::new("T123"));
        api.cache().set(
            CacheKey::new(Operation::UserDetails, None),
            serde_json::json!({"me": {"id": "1"}}),
        );

        api.sign_out();

        assert!(!api.is_logged_in());
        assert!(api
            .cache()
            .get(&CacheKey::new(Operation::UserDetails, None))
            .is_none());
    }

    #[test]
    fn test_attach_auth_listener_observes_transitions() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let token_store = Arc::new(TokenStore::new(MemoryTokenStorage::new()));
        let config = SaleorConfig::builder()
            .endpoint(ApiEndpoint::new("https://demo.saleor.io/graphql/").unwrap())
            .build()
            .unwrap();
        let api = SaleorApi::new(&config, Arc::clone(&token_store));

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let _subscription = api.attach_auth_listener(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        token_store.set(AuthToken::new("T123"));
        api.sign_out();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_sign_in_payload_deserializes_token_create_node() {
        let payload: SignInPayload = serde_json::from_value(serde_json::json!({
            "token": "T123",
            "user": {"id": "1", "email": "a@b.com"},
            "errors": []
        }))
        .unwrap();

        assert_eq!(payload.token.as_deref(), Some("T123"));
        assert!(payload.errors.is_empty());
    }

    #[tokio::test]
    async fn test_fire_query_cache_first_serves_hit_without_network() {
        // The endpoint is unreachable; a cache hit must short-circuit
        // before any network attempt.
        let api = create_test_api();
        let key = CacheKey::new(
            Operation::ProductDetails,
            Some(&serde_json::json!({"id": "1"})),
        );
        api.cache()
            .set(key, serde_json::json!({"product": {"id": "1", "name": "Hat"}}));

        let name = api
            .fire_query(
                Operation::ProductDetails,
                Some(serde_json::json!({"id": "1"})),
                QueryOptions::default().fetch_policy(FetchPolicy::CacheFirst),
                |data| {
                    data.and_then(|value| value.pointer("/product/name"))
                        .and_then(Value::as_str)
                        .map(String::from)
                },
            )
            .await
            .unwrap();

        assert_eq!(name.as_deref(), Some("Hat"));
    }
}
