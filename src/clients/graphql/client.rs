//! GraphQL client implementation.
//!
//! This module provides the [`GraphqlClient`] type for executing GraphQL
//! operations against a Saleor endpoint.

use std::sync::Arc;

use crate::auth::TokenStore;
use crate::clients::graphql::{GraphqlError, GraphqlResponse};
use crate::clients::HttpClient;
use crate::config::SaleorConfig;

/// GraphQL client for the Saleor API.
///
/// Executes operations through the internal [`HttpClient`] and returns the
/// raw response envelope untouched, except for one incoming-side concern:
/// every response is inspected for the backend's invalid-credential signal,
/// and on detection the shared [`TokenStore`] is cleared (which notifies
/// any registered auth listeners).
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync` and cheap to clone; watched-query
/// workers each hold their own clone.
///
/// # Example
///
/// ```rust,ignore
/// use serde_json::json;
///
/// let response = client.run(
///     "query ProductDetails($id: ID!) { product(id: $id) { name } }",
///     Some(json!({ "id": "UHJvZHVjdDo3Mg==" })),
///     1,
/// ).await?;
///
/// if let Some(data) = &response.data {
///     println!("product: {}", data["product"]["name"]);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct GraphqlClient {
    /// The internal HTTP client for making requests.
    http_client: HttpClient,
    /// Cleared when a response carries the invalid-credential signal.
    token_store: Arc<TokenStore>,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a new GraphQL client for the configured endpoint.
    ///
    /// The token store is shared with the HTTP layer (which attaches the
    /// credential on every outgoing request) and with the invalidation
    /// detector (which clears it on the invalid-credential signal).
    #[must_use]
    pub fn new(config: &SaleorConfig, token_store: Arc<TokenStore>) -> Self {
        let http_client = HttpClient::new(config, Arc::clone(&token_store));
        Self {
            http_client,
            token_store,
        }
    }

    /// Executes a GraphQL operation.
    ///
    /// Sends a POST request with the document and optional variables, and
    /// deserializes the response envelope.
    ///
    /// # Arguments
    ///
    /// * `document` - The GraphQL document to execute
    /// * `variables` - Optional variables for the operation
    /// * `tries` - Number of attempts for transient failures (1 = no retries)
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::Http`] for HTTP-level errors (network
    /// errors, non-2xx responses, retry exhaustion) and
    /// [`GraphqlError::Decode`] if the body is not a GraphQL envelope.
    ///
    /// GraphQL-level errors (validation errors, domain errors) arrive with
    /// HTTP 200 and are returned inside the envelope for the normalizer to
    /// unify.
    pub async fn run(
        &self,
        document: &str,
        variables: Option<serde_json::Value>,
        tries: u32,
    ) -> Result<GraphqlResponse, GraphqlError> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables
        });

        let http_response = self.http_client.post(&body, None, tries).await?;
        let response: GraphqlResponse = serde_json::from_value(http_response.body)?;

        // Invalidation detector: an invalid-credential signal destroys the
        // live token and notifies auth listeners via the store.
        if response.has_invalid_token_signal() {
            tracing::warn!("invalid credential reported by backend, clearing stored token");
            self.token_store.clear();
        }

        Ok(response)
    }
}
