//! Error normalization.
//!
//! The backend reports failures through two channels: transport-level
//! errors in the response's top-level `errors` list, and domain-level
//! validation errors embedded inside successful payloads. [`normalize`]
//! unifies both into a single [`UnifiedOutcome`]: either a projected
//! success value or a [`UnifiedError`], never both.
//!
//! # Policy
//!
//! When errors exist but the payload still carries usable data, the
//! normalizer favors delivering data: partial success with attached domain
//! errors projects the payload, and callers needing the errors recover
//! them from the payload's own `errors` field. Only when the payload is
//! empty does the error win.

use serde_json::Value;

use crate::api::error::UnifiedError;
use crate::clients::graphql::{DomainError, TransportError};

/// The single success-or-error result delivered to callers.
#[derive(Debug)]
pub enum UnifiedOutcome<T> {
    /// The projected success value.
    Data(T),
    /// The unified error; the payload carried nothing usable.
    Errors(UnifiedError),
}

impl<T> UnifiedOutcome<T> {
    /// Converts the outcome into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the [`UnifiedError`] if the outcome is `Errors`.
    pub fn into_result(self) -> Result<T, UnifiedError> {
        match self {
            Self::Data(value) => Ok(value),
            Self::Errors(error) => Err(error),
        }
    }
}

/// Normalizes a raw response into a single outcome.
///
/// # Algorithm
///
/// 1. Scan `data` recursively for embedded domain errors (non-empty
///    `errors` lists inside payload objects).
/// 2. If either channel holds errors, construct a [`UnifiedError`] with
///    `extra_info` set to the domain errors found.
/// 3. If an error was constructed and the payload is empty (the root is
///    null/absent, or every direct child of the root object is null), the
///    error wins and no projection is attempted.
/// 4. Otherwise apply `map_fn` (the caller-supplied projection from the
///    raw nested payload down to the fields the caller cares about) and
///    deliver data. This path is taken even when domain errors were found,
///    as long as the payload is non-empty.
///
/// `map_fn` receives `Option<&Value>` and must tolerate `None`.
pub fn normalize<T, F>(
    map_fn: F,
    data: Option<&Value>,
    transport_errors: &[TransportError],
) -> UnifiedOutcome<T>
where
    F: FnOnce(Option<&Value>) -> T,
{
    let domain_errors = collect_domain_errors(data);

    if (!transport_errors.is_empty() || !domain_errors.is_empty()) && is_empty_payload(data) {
        return UnifiedOutcome::Errors(UnifiedError::new(
            transport_errors.to_vec(),
            domain_errors,
        ));
    }

    UnifiedOutcome::Data(map_fn(data))
}

/// Recursively collects domain errors embedded in the payload.
///
/// Every mutation payload type carries an `errors` field; any non-empty
/// list of objects with a `message` found under that key, at any depth,
/// is treated as a domain-error list.
#[must_use]
pub fn collect_domain_errors(data: Option<&Value>) -> Vec<DomainError> {
    let mut found = Vec::new();
    if let Some(value) = data {
        scan_value(value, &mut found);
    }
    found
}

fn scan_value(value: &Value, found: &mut Vec<DomainError>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "errors" {
                    if let Value::Array(entries) = child {
                        found.extend(entries.iter().filter_map(parse_domain_error));
                        continue;
                    }
                }
                scan_value(child, found);
            }
        }
        Value::Array(entries) => {
            for entry in entries {
                scan_value(entry, found);
            }
        }
        _ => {}
    }
}

fn parse_domain_error(entry: &Value) -> Option<DomainError> {
    // Only shaped entries count; an `errors` list of strings or numbers is
    // not the domain-error convention.
    entry.as_object()?;
    serde_json::from_value(entry.clone()).ok()
}

/// Returns `true` if the payload carries no usable data.
///
/// Empty means: the root is absent or null, or the root is an object whose
/// direct children are all null (an object with no fields counts as empty).
/// A non-object root with a value is never empty.
fn is_empty_payload(data: Option<&Value>) -> bool {
    match data {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.values().all(Value::is_null),
        Some(_) => false,
    }
}
