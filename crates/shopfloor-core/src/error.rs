//! Error types for the shopfloor library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all workshop operations.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Product not found for the given ID
    #[error("Product with ID {id} not found")]
    ProductNotFound { id: u64 },
    /// Step not found for the given ID
    #[error("Step with ID {id} not found")]
    StepNotFound { id: u64 },
    /// A name search matched nothing
    #[error("No products match '{query}'")]
    NoMatches { query: String },
    /// An invariant the lifecycle relies on does not hold in the store
    #[error("Consistency fault: {message}")]
    ConsistencyFault { message: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification used by the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed input, rejected before touching storage.
    Validation,
    /// A referenced product or step does not exist.
    NotFound,
    /// The store contradicts an invariant the orchestrator relies on.
    Consistency,
    /// Infrastructure failure (database, file system, runtime).
    Storage,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ShopError {
        ShopError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ShopError {
        ShopError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ShopError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a consistency fault with the given message.
    pub fn consistency(message: impl Into<String>) -> Self {
        Self::ConsistencyFault {
            message: message.into(),
        }
    }

    /// Classifies the error for the request boundary.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::Validation,
            Self::ProductNotFound { .. } | Self::StepNotFound { .. } | Self::NoMatches { .. } => {
                ErrorKind::NotFound
            }
            Self::ConsistencyFault { .. } => ErrorKind::Consistency,
            Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. }
            | Self::Configuration { .. } => ErrorKind::Storage,
        }
    }

    /// Wraps a blocking-task join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ShopError::database(message).with_source(e))
    }
}

/// Result type alias for workshop operations
pub type Result<T> = std::result::Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ShopError::invalid_input("name").with_reason("empty").kind(),
            ErrorKind::Validation
        );
        assert_eq!(ShopError::StepNotFound { id: 1 }.kind(), ErrorKind::NotFound);
        assert_eq!(ShopError::ProductNotFound { id: 1 }.kind(), ErrorKind::NotFound);
        assert_eq!(
            ShopError::NoMatches {
                query: "x".to_string()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(ShopError::consistency("orphan").kind(), ErrorKind::Consistency);
        assert_eq!(
            ShopError::database("boom")
                .with_source(rusqlite::Error::InvalidQuery)
                .kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> = Err(rusqlite::Error::InvalidQuery);
        let error = result.db_context("Failed to run query").unwrap_err();
        assert!(error.to_string().contains("Failed to run query"));
        assert!(matches!(error, ShopError::Database { .. }));
    }
}
