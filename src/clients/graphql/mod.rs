//! GraphQL execution layer.
//!
//! This module provides the [`GraphqlClient`] for executing operations,
//! the raw wire shapes ([`GraphqlResponse`], [`TransportError`],
//! [`DomainError`]), and the [`GraphqlError`] execution error type.

mod client;
mod errors;
mod response;

pub use client::GraphqlClient;
pub use errors::GraphqlError;
pub use response::{DomainError, GraphqlResponse, TransportError};
