//! Authentication token type.
//!
//! This module provides the [`AuthToken`] newtype holding the credential
//! returned by a successful sign-in.
//!
//! # Security
//!
//! [`AuthToken`] implements a custom [`Debug`] trait that masks the token
//! value, preventing accidental exposure in logs.
//!
//! # Example
//!
//! ```rust
//! use saleor_api::AuthToken;
//!
//! let token = AuthToken::new("secret-token");
//! assert_eq!(token.as_str(), "secret-token");
//!
//! // Debug output masks the token value
//! let debug_output = format!("{:?}", token);
//! assert!(debug_output.contains("*****"));
//! assert!(!debug_output.contains("secret-token"));
//! ```

use std::fmt;

/// HTTP header name the token is attached under.
pub const AUTH_HEADER_NAME: &str = "Authorization";

/// An opaque Saleor authentication token.
///
/// Tokens are issued by the backend on sign-in and attached to every
/// outgoing request while present in the
/// [`TokenStore`](crate::auth::TokenStore). The client never inspects the
/// token's contents.
///
/// # Security
///
/// The [`Debug`] implementation masks the token value to prevent accidental
/// exposure:
///
/// ```rust
/// use saleor_api::AuthToken;
///
/// let token = AuthToken::new("secret");
/// assert_eq!(format!("{:?}", token), "AuthToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a token from its raw string value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the value for the `Authorization` header.
    ///
    /// Saleor expects the `JWT` scheme:
    ///
    /// ```rust
    /// use saleor_api::AuthToken;
    ///
    /// let token = AuthToken::new("abc");
    /// assert_eq!(token.header_value(), "JWT abc");
    /// ```
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("JWT {}", self.0)
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trips_raw_value() {
        let token = AuthToken::new("my-token");
        assert_eq!(token.as_str(), "my-token");
    }

    #[test]
    fn test_header_value_uses_jwt_scheme() {
        let token = AuthToken::new("T123");
        assert_eq!(token.header_value(), "JWT T123");
    }

    #[test]
    fn test_debug_masks_token_value() {
        let token = AuthToken::new("super-secret-token");
        let debug_output = format!("{token:?}");

        assert_eq!(debug_output, "AuthToken(*****)");
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_token_from_string() {
        let token: AuthToken = "abc".to_string().into();
        assert_eq!(token.as_str(), "abc");
    }

    #[test]
    fn test_token_clone_and_eq() {
        let token = AuthToken::new("abc");
        assert_eq!(token.clone(), token);
    }
}
