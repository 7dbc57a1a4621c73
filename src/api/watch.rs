//! Watched-query subscriptions.
//!
//! A watched query is a live subscription: it emits any cached result
//! first (policy permitting), then the network result, and re-emits on
//! every [`refetch`](WatchedQuery::refetch). Each emission passes through
//! the error normalizer and invokes exactly one of the caller's
//! `on_update`/`on_error` handlers; `on_complete` fires once, after the
//! first successful update.
//!
//! Every subscription is backed by one worker task, so emissions are
//! delivered in pipeline order with no coalescing. Dropping the
//! [`WatchedQuery`] handle (or calling
//! [`unsubscribe`](WatchedQuery::unsubscribe)) stops further delivery;
//! in-flight requests are not aborted, their results are silently
//! discarded.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use crate::api::cache::{CacheKey, QueryCache};
use crate::api::error::ApiError;
use crate::api::normalize::normalize;
use crate::api::operations::Operation;
use crate::api::options::{FetchPolicy, QueryOptions};
use crate::clients::GraphqlClient;

pub(crate) type MapFn<T> = Arc<dyn Fn(Option<&Value>) -> T + Send + Sync>;
type UpdateFn<T> = Box<dyn Fn(&T) + Send + Sync>;
type ErrorFn = Box<dyn Fn(&ApiError) + Send + Sync>;
type CompleteFn = Box<dyn FnOnce() + Send>;

/// Callbacks invoked as a watched query emits.
///
/// # Example
///
/// ```rust,ignore
/// let handlers = WatchHandlers::new(|product| println!("got {product:?}"))
///     .on_error(|error| eprintln!("watch failed: {error}"))
///     .on_complete(|| println!("first result in"));
/// ```
pub struct WatchHandlers<T> {
    on_update: UpdateFn<T>,
    on_error: Option<ErrorFn>,
    on_complete: Option<CompleteFn>,
}

impl<T> WatchHandlers<T> {
    /// Creates handlers with the required update callback.
    #[must_use]
    pub fn new(on_update: impl Fn(&T) + Send + Sync + 'static) -> Self {
        Self {
            on_update: Box::new(on_update),
            on_error: None,
            on_complete: None,
        }
    }

    /// Sets the callback invoked on every failed emission.
    #[must_use]
    pub fn on_error(mut self, on_error: impl Fn(&ApiError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(on_error));
        self
    }

    /// Sets the callback invoked once, after the first successful update.
    #[must_use]
    pub fn on_complete(mut self, on_complete: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(on_complete));
        self
    }
}

/// State shared between the handle and the worker task.
struct WatchShared<T> {
    /// Cleared on unsubscribe; checked before every handler invocation.
    active: AtomicBool,
    on_update: UpdateFn<T>,
    on_error: Option<ErrorFn>,
    /// Taken on the first successful delivery.
    on_complete: Mutex<Option<CompleteFn>>,
    /// The variables the subscription currently runs with.
    variables: Mutex<Option<Value>>,
}

impl<T> WatchShared<T> {
    /// Invokes exactly one handler for the result, unless the subscription
    /// has been unsubscribed, in which case the result is discarded.
    fn deliver(&self, result: &Result<T, ApiError>) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }
        match result {
            Ok(value) => {
                (self.on_update)(value);
                if let Some(on_complete) = self
                    .on_complete
                    .lock()
                    .expect("watch completion lock")
                    .take()
                {
                    on_complete();
                }
            }
            Err(error) => {
                if let Some(on_error) = &self.on_error {
                    on_error(error);
                }
            }
        }
    }

    fn current_variables(&self) -> Option<Value> {
        self.variables.lock().expect("watch variables lock").clone()
    }
}

/// Control messages from the handle to the worker.
enum WatchCommand<T> {
    Refetch {
        variables: Option<Value>,
        reply: oneshot::Sender<Result<T, ApiError>>,
    },
    SetOptions(QueryOptions),
}

/// The worker task driving one subscription.
struct WatchWorker<T> {
    client: GraphqlClient,
    cache: Arc<QueryCache>,
    operation: Operation,
    options: QueryOptions,
    map_fn: MapFn<T>,
    shared: Arc<WatchShared<T>>,
    commands: mpsc::Receiver<WatchCommand<T>>,
}

impl<T: Send + 'static> WatchWorker<T> {
    async fn run(mut self) {
        tracing::debug!(operation = self.operation.name(), "watched query active");

        // Initial emission cycle: cached result first (policy permitting),
        // then the network result.
        let variables = self.shared.current_variables();
        let mut served_from_cache = false;
        if self.options.fetch_policy != FetchPolicy::NetworkOnly {
            let key = CacheKey::new(self.operation, variables.as_ref());
            if let Some(cached) = self.cache.get(&key) {
                let projected = (self.map_fn)(Some(&cached));
                self.shared.deliver(&Ok(projected));
                served_from_cache = true;
            }
        }

        let cache_satisfied =
            self.options.fetch_policy == FetchPolicy::CacheFirst && served_from_cache;
        if !cache_satisfied {
            let result = self.fetch(variables).await;
            self.shared.deliver(&result);
        }

        while let Some(command) = self.commands.recv().await {
            match command {
                WatchCommand::Refetch { variables, reply } => {
                    tracing::debug!(operation = self.operation.name(), "watched query updating");
                    if let Some(new_variables) = variables {
                        *self.shared.variables.lock().expect("watch variables lock") =
                            Some(new_variables);
                    }
                    let variables = self.shared.current_variables();
                    let result = self.fetch(variables).await;
                    self.shared.deliver(&result);
                    // The refetch caller may have gone away; that only
                    // means nobody is awaiting the fresh value.
                    let _ = reply.send(result);
                }
                WatchCommand::SetOptions(options) => {
                    self.options = options;
                }
            }
        }

        tracing::debug!(operation = self.operation.name(), "watched query unsubscribed");
    }

    /// Runs one network round trip, caching the raw payload and
    /// normalizing the outcome.
    async fn fetch(&self, variables: Option<Value>) -> Result<T, ApiError> {
        let raw = self
            .client
            .run(
                self.operation.document(),
                variables.clone(),
                self.options.tries,
            )
            .await
            .map_err(ApiError::Request)?;

        if let Some(data) = &raw.data {
            self.cache
                .set(CacheKey::new(self.operation, variables.as_ref()), data.clone());
        }

        normalize(|data| (self.map_fn)(data), raw.data.as_ref(), &raw.errors)
            .into_result()
            .map_err(ApiError::Response)
    }
}

/// Handle to a live watched-query subscription.
///
/// Dropping the handle unsubscribes: no further handler invocations occur,
/// and the worker task winds down after finishing any in-flight work.
#[must_use = "dropping the handle unsubscribes the watched query"]
pub struct WatchedQuery<T> {
    commands: mpsc::Sender<WatchCommand<T>>,
    shared: Arc<WatchShared<T>>,
    cache: Arc<QueryCache>,
    operation: Operation,
    map_fn: MapFn<T>,
}

impl<T: Send + 'static> WatchedQuery<T> {
    /// Starts a subscription, spawning its worker task.
    pub(crate) fn spawn(
        client: GraphqlClient,
        cache: Arc<QueryCache>,
        operation: Operation,
        variables: Option<Value>,
        options: QueryOptions,
        map_fn: MapFn<T>,
        handlers: WatchHandlers<T>,
    ) -> Self {
        let shared = Arc::new(WatchShared {
            active: AtomicBool::new(true),
            on_update: handlers.on_update,
            on_error: handlers.on_error,
            on_complete: Mutex::new(handlers.on_complete),
            variables: Mutex::new(variables),
        });

        let (commands_tx, commands_rx) = mpsc::channel(8);

        let worker = WatchWorker {
            client,
            cache: Arc::clone(&cache),
            operation,
            options,
            map_fn: Arc::clone(&map_fn),
            shared: Arc::clone(&shared),
            commands: commands_rx,
        };
        tokio::spawn(worker.run());

        Self {
            commands: commands_tx,
            shared,
            cache,
            operation,
            map_fn,
        }
    }

    /// Re-runs the query, optionally with new variables.
    ///
    /// Any cached result for the effective variables is surfaced through
    /// `on_update` immediately, before the network round trip; the
    /// returned future resolves with the fresh network value (which is
    /// also delivered through the handlers).
    ///
    /// # Errors
    ///
    /// Returns the normalized error for the network result, or
    /// [`ApiError::SubscriptionClosed`] if the worker is gone.
    pub async fn refetch(&self, variables: Option<Value>) -> Result<T, ApiError> {
        let effective_variables = variables
            .clone()
            .or_else(|| self.shared.current_variables());
        let key = CacheKey::new(self.operation, effective_variables.as_ref());
        if let Some(cached) = self.cache.get(&key) {
            let projected = (self.map_fn)(Some(&cached));
            self.shared.deliver(&Ok(projected));
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(WatchCommand::Refetch {
                variables,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ApiError::SubscriptionClosed)?;
        reply_rx.await.map_err(|_| ApiError::SubscriptionClosed)?
    }

    /// Replaces the subscription's per-call options.
    pub async fn set_options(&self, options: QueryOptions) {
        let _ = self.commands.send(WatchCommand::SetOptions(options)).await;
    }

    /// Stops the subscription.
    ///
    /// Equivalent to dropping the handle; provided for call sites that
    /// want to make the unsubscription explicit.
    pub fn unsubscribe(self) {
        // Drop impl does the work.
    }
}

impl<T> Drop for WatchedQuery<T> {
    fn drop(&mut self) {
        // Stop delivery immediately; the worker exits once the command
        // channel closes, letting any in-flight request finish unobserved.
        self.shared.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handlers_builder_accumulates_callbacks() {
        let handlers: WatchHandlers<i32> = WatchHandlers::new(|_| {})
            .on_error(|_| {})
            .on_complete(|| {});

        assert!(handlers.on_error.is_some());
        assert!(handlers.on_complete.is_some());
    }

    #[test]
    fn test_deliver_respects_active_flag() {
        let delivered = Arc::new(AtomicBool::new(false));
        let delivered_clone = Arc::clone(&delivered);

        let shared: WatchShared<i32> = WatchShared {
            active: AtomicBool::new(false),
            on_update: Box::new(move |_| delivered_clone.store(true, Ordering::SeqCst)),
            on_error: None,
            on_complete: Mutex::new(None),
            variables: Mutex::new(None),
        };

        shared.deliver(&Ok(1));
        assert!(!delivered.load(Ordering::SeqCst));

        shared.active.store(true, Ordering::SeqCst);
        shared.deliver(&Ok(1));
        assert!(delivered.load(Ordering::SeqCst));
    }

    #[test]
    fn test_on_complete_fires_once_after_first_success() {
        let completions = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let completions_clone = Arc::clone(&completions);

        let shared: WatchShared<i32> = WatchShared {
            active: AtomicBool::new(true),
            on_update: Box::new(|_| {}),
            on_error: None,
            on_complete: Mutex::new(Some(Box::new(move || {
                completions_clone.fetch_add(1, Ordering::SeqCst);
            }))),
            variables: Mutex::new(None),
        };

        shared.deliver(&Ok(1));
        shared.deliver(&Ok(2));
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_delivery_does_not_complete() {
        let completions = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let completions_clone = Arc::clone(&completions);

        let shared: WatchShared<i32> = WatchShared {
            active: AtomicBool::new(true),
            on_update: Box::new(|_| {}),
            on_error: None,
            on_complete: Mutex::new(Some(Box::new(move || {
                completions_clone.fetch_add(1, Ordering::SeqCst);
            }))),
            variables: Mutex::new(None),
        };

        shared.deliver(&Err(ApiError::SubscriptionClosed));
        assert_eq!(completions.load(Ordering::SeqCst), 0);

        shared.deliver(&Ok(1));
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }
}
