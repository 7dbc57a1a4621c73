//! GraphQL wire shapes.
//!
//! This module provides the raw response envelope ([`GraphqlResponse`]) and
//! the two error shapes it can carry:
//!
//! - [`TransportError`]: a protocol-level error entry from the response's
//!   top-level `errors` list
//! - [`DomainError`]: a business-rule validation failure embedded inside an
//!   otherwise-successful mutation payload
//!
//! The distinction matters: transport errors mean the operation itself
//! failed, while domain errors arrive with HTTP 200 inside `data` and are
//! unified with transport errors by the normalizer in [`crate::api`].

use serde::{Deserialize, Serialize};

/// Extension codes the backend uses to signal an invalid or expired
/// credential.
const INVALID_TOKEN_CODES: [&str; 3] = [
    "InvalidTokenError",
    "JSONWebTokenError",
    "JSONWebTokenExpired",
];

/// A protocol-level GraphQL error entry.
///
/// These appear in the response's top-level `errors` list: connectivity
/// problems surfaced by the server, malformed queries, resolver crashes,
/// and authentication failures.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TransportError {
    /// Human-readable error description.
    pub message: String,
    /// Response path the error applies to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,
    /// Server-specific error metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl TransportError {
    /// Returns `true` if this entry is the backend's invalid-credential
    /// signal.
    ///
    /// Matched on the exception code in `extensions`, falling back to the
    /// well-known expiry message for older backends that omit extensions.
    #[must_use]
    pub fn is_invalid_token_signal(&self) -> bool {
        let code = self
            .extensions
            .as_ref()
            .and_then(|extensions| extensions.get("exception"))
            .and_then(|exception| exception.get("code"))
            .and_then(serde_json::Value::as_str);

        match code {
            Some(code) => INVALID_TOKEN_CODES.contains(&code),
            None => self.message == "Signature has expired",
        }
    }
}

/// A business-rule validation failure embedded in a successful payload.
///
/// Every mutation payload carries an `errors` list of these; a non-empty
/// list means the backend rejected the request on domain grounds (invalid
/// address, wrong password) while the transport succeeded.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DomainError {
    /// The input field the error applies to; absent for unscoped errors.
    #[serde(default)]
    pub field: Option<String>,
    /// Human-readable error description.
    pub message: String,
}

/// The raw result of one GraphQL request: a data payload (possibly
/// partially populated, possibly absent) plus zero or more transport
/// errors.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphqlResponse {
    /// The data payload, if the server produced one.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Protocol-level errors, if any.
    #[serde(default)]
    pub errors: Vec<TransportError>,
}

impl GraphqlResponse {
    /// Returns `true` if any transport error carries the
    /// invalid-credential signal.
    #[must_use]
    pub fn has_invalid_token_signal(&self) -> bool {
        self.errors.iter().any(TransportError::is_invalid_token_signal)
    }
}
