//! Error types for the Saleor API client.
//!
//! This module contains error types used throughout the crate for
//! configuration and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use saleor_api::{ApiEndpoint, ConfigError};
//!
//! let result = ApiEndpoint::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyEndpoint)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API endpoint cannot be empty.
    #[error("API endpoint cannot be empty. Please provide the URL of a Saleor GraphQL endpoint.")]
    EmptyEndpoint,

    /// API endpoint is not a valid URL.
    #[error("Invalid API endpoint '{url}'. Please provide a full URL with scheme (e.g., 'https://demo.saleor.io/graphql/').")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_endpoint_error_message() {
        let error = ConfigError::EmptyEndpoint;
        let message = error.to_string();
        assert!(message.contains("cannot be empty"));
        assert!(message.contains("Saleor GraphQL endpoint"));
    }

    #[test]
    fn test_invalid_endpoint_error_message() {
        let error = ConfigError::InvalidEndpoint {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "endpoint" };
        let message = error.to_string();
        assert!(message.contains("endpoint"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyEndpoint;
        // Verify it implements std::error::Error by using it as a dyn Error
        let _: &dyn std::error::Error = &error;
    }
}
