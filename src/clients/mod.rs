//! HTTP and GraphQL client types.
//!
//! This module provides the transport pipeline for communicating with a
//! Saleor endpoint. It handles request/response processing, retry logic,
//! per-request credential attachment, and invalid-credential detection.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client terminating the pipeline
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpError`]: Unified error type for HTTP failures
//! - [`graphql::GraphqlClient`]: GraphQL execution over the HTTP client
//! - [`graphql::GraphqlResponse`]: The raw GraphQL response envelope
//!
//! # Retry Behavior
//!
//! The client implements automatic retry logic for transient failures:
//!
//! - **429 (Rate Limited)**: Retries using the `Retry-After` header value, or 1 second if not present
//! - **500 (Server Error)**: Retries with a fixed 1-second delay
//! - **Other errors (4xx)**: Returns immediately without retry
//!
//! The default is a single attempt (no retries); configure via
//! [`SaleorConfig::tries`](crate::config::SaleorConfig) or per call.

mod errors;
pub mod graphql;
mod http_client;
mod http_response;

pub use errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_response::HttpResponse;

// Re-export GraphQL client types at the clients module level
pub use graphql::{GraphqlClient, GraphqlError};
