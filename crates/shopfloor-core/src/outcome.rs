//! Tagged result type consumed by the request boundary.

use serde::Serialize;

use crate::error::{ErrorKind, Result, ShopError};

/// Result of an operation as seen by a client.
///
/// Every [`ShopError`] maps onto exactly one error arm through
/// [`ShopError::kind`], so callers never need to inspect error variants.
///
/// ```rust
/// use shopfloor_core::{Outcome, ShopError};
///
/// let missing: Outcome<()> = Err(ShopError::StepNotFound { id: 7 }).into();
/// assert!(matches!(missing, Outcome::NotFoundError { .. }));
/// assert_eq!(missing.message(), Some("Step with ID 7 not found"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The operation succeeded
    Ok { value: T },
    /// Input was rejected before touching storage
    ValidationError { message: String },
    /// A referenced entity does not exist
    NotFoundError { message: String },
    /// The store or runtime failed
    StorageError { message: String },
    /// The store contradicts a lifecycle invariant
    ConsistencyFault { message: String },
}

impl<T> Outcome<T> {
    /// Error message, if this is an error outcome.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Ok { .. } => None,
            Outcome::ValidationError { message }
            | Outcome::NotFoundError { message }
            | Outcome::StorageError { message }
            | Outcome::ConsistencyFault { message } => Some(message),
        }
    }

    /// Whether the operation succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }
}

impl<T> From<ShopError> for Outcome<T> {
    fn from(error: ShopError) -> Self {
        let message = error.to_string();
        match error.kind() {
            ErrorKind::Validation => Outcome::ValidationError { message },
            ErrorKind::NotFound => Outcome::NotFoundError { message },
            ErrorKind::Storage => Outcome::StorageError { message },
            ErrorKind::Consistency => Outcome::ConsistencyFault { message },
        }
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Outcome::Ok { value },
            Err(error) => error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_map_to_arms() {
        let outcome: Outcome<u64> = Err(ShopError::invalid_input("name").with_reason("empty")).into();
        assert!(matches!(outcome, Outcome::ValidationError { .. }));

        let outcome: Outcome<u64> = Err(ShopError::consistency("orphan step")).into();
        assert_eq!(outcome.message(), Some("Consistency fault: orphan step"));

        let outcome: Outcome<u64> = Err(ShopError::database("locked")
            .with_source(rusqlite::Error::InvalidQuery))
        .into();
        assert!(matches!(outcome, Outcome::StorageError { .. }));
    }

    #[test]
    fn test_ok_serializes_with_tag() {
        let outcome: Outcome<u64> = Ok(3).into();
        assert!(outcome.is_ok());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "outcome": "ok", "value": 3 })
        );
    }
}
