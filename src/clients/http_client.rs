//! HTTP client for Saleor API communication.
//!
//! This module provides the [`HttpClient`] type for making authenticated
//! requests to the Saleor GraphQL endpoint with automatic retry handling.

use std::collections::HashMap;
use std::sync::Arc;

use crate::auth::{TokenStore, AUTH_HEADER_NAME};
use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_response::HttpResponse;
use crate::config::SaleorConfig;

/// Fixed retry wait time in seconds.
pub const RETRY_WAIT_TIME: u64 = 1;

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Saleor API.
///
/// The client handles:
/// - Default headers including User-Agent
/// - Per-request credential attachment from the [`TokenStore`]
/// - Automatic retry logic for 429 and 500 responses
///
/// # Credential Attachment
///
/// The token store is consulted on **every** outgoing request, not at
/// construction time: the token can be set or cleared underneath a live
/// client, and the next request must reflect that. When a token is present
/// it is attached as `Authorization: JWT <token>`; when absent, no
/// credential header is sent.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Clone, Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// The GraphQL endpoint URL.
    endpoint: String,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
    /// Source of the credential attached to outgoing requests.
    token_store: Arc<TokenStore>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured endpoint.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &SaleorConfig, token_store: Arc<TokenStore>) -> Self {
        // Build User-Agent header
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Saleor API Client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: config.endpoint().as_ref().to_string(),
            default_headers,
            token_store,
        }
    }

    /// Returns the endpoint URL this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a JSON POST request to the endpoint.
    ///
    /// This method handles:
    /// - Credential attachment from the token store
    /// - Header merging
    /// - Response parsing
    /// - Retry logic for 429 and 500 responses
    ///
    /// # Arguments
    ///
    /// * `body` - The JSON request body
    /// * `extra_headers` - Optional additional headers for this request
    /// * `tries` - Number of attempts (1 means no retries)
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - A network error occurs (`Network`)
    /// - A non-2xx response is received (`Response`)
    /// - Max retries are exceeded (`MaxRetries`)
    pub async fn post(
        &self,
        body: &serde_json::Value,
        extra_headers: Option<&HashMap<String, String>>,
        tries: u32,
    ) -> Result<HttpResponse, HttpError> {
        let tries = tries.max(1);

        // Merge headers; the credential is read fresh on every request.
        let mut headers = self.default_headers.clone();
        if let Some(token) = self.token_store.get() {
            headers.insert(AUTH_HEADER_NAME.to_string(), token.header_value());
        }
        if let Some(extra) = extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        // Retry loop
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;

            let mut req_builder = self.client.post(&self.endpoint);
            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }
            req_builder = req_builder.body(body.to_string());

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body_json = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text).unwrap_or_else(|_| {
                    // For 5xx errors, keep the raw body for diagnostics
                    if code >= 500 {
                        serde_json::json!({ "raw_body": body_text })
                    } else {
                        serde_json::json!({})
                    }
                })
            };

            let response = HttpResponse::new(code, res_headers, body_json);

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::serialize_error(&response);

            let should_retry = code == 429 || code == 500;
            if !should_retry {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            if attempt >= tries {
                if tries == 1 {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: error_message,
                        error_reference: response.request_id().map(String::from),
                    }));
                }
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries,
                    message: error_message,
                    error_reference: response.request_id().map(String::from),
                }));
            }

            let delay = Self::calculate_retry_delay(&response, code);
            tracing::warn!(
                code,
                attempt,
                delay_secs = delay.as_secs_f64(),
                "retrying request after transient failure"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Calculates the retry delay based on response and status code.
    fn calculate_retry_delay(response: &HttpResponse, status: u16) -> std::time::Duration {
        // For 429: use Retry-After if present, otherwise fixed delay
        // For 500: always use fixed delay (ignore Retry-After)
        if status == 429 {
            if let Some(retry_after) = response.retry_request_after {
                return std::time::Duration::from_secs_f64(retry_after);
            }
        }
        std::time::Duration::from_secs(RETRY_WAIT_TIME)
    }

    /// Serializes an error response body to a JSON digest.
    fn serialize_error(response: &HttpResponse) -> String {
        let mut error_body = serde_json::Map::new();

        if let Some(errors) = response.body.get("errors") {
            error_body.insert("errors".to_string(), errors.clone());
        }
        if let Some(error) = response.body.get("error") {
            error_body.insert("error".to_string(), error.clone());
        }
        if let Some(raw) = response.body.get("raw_body") {
            error_body.insert("raw_body".to_string(), raw.clone());
        }

        if let Some(request_id) = response.request_id() {
            error_body.insert(
                "error_reference".to_string(),
                serde_json::json!(format!(
                    "If you report this error, please include this id: {request_id}."
                )),
            );
        }

        serde_json::to_string(&error_body).unwrap_or_else(|_| "{}".to_string())
    }
}
