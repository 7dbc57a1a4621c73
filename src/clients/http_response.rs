//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type for parsing and accessing
//! API response data.

use std::collections::HashMap;

/// A parsed HTTP response from the API.
///
/// Wraps the status code, response headers (lower-cased, multi-valued),
/// and the JSON-decoded body.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use saleor_api::clients::HttpResponse;
///
/// let response = HttpResponse::new(
///     200,
///     HashMap::new(),
///     serde_json::json!({"data": {"me": null}}),
/// );
///
/// assert!(response.is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The JSON-decoded response body.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying, from the Retry-After header.
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a response from its parts, extracting retry metadata from
    /// the headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse().ok());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns the request ID from the X-Request-Id header, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
