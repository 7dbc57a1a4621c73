//! GraphQL-specific error types.
//!
//! This module contains error types for GraphQL execution, wrapping HTTP
//! errors and response-envelope decode failures.
//!
//! GraphQL-level errors (validation failures, domain errors) are not
//! execution errors: the backend returns them with HTTP 200 inside the
//! response body, and the normalizer in [`crate::api`] unifies them.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for GraphQL execution.
///
/// # Example
///
/// ```rust
/// use saleor_api::clients::{HttpError, HttpResponseError};
/// use saleor_api::clients::graphql::GraphqlError;
///
/// let http_error = HttpError::Response(HttpResponseError {
///     code: 401,
///     message: r#"{"error":"Unauthorized"}"#.to_string(),
///     error_reference: None,
/// });
/// let graphql_error: GraphqlError = http_error.into();
/// assert!(graphql_error.to_string().contains("Unauthorized"));
/// ```
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    ///
    /// This variant wraps [`HttpError`] for unified error handling.
    /// It includes network errors, non-2xx responses, and retry exhaustion.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body was not a valid GraphQL envelope.
    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),
}
