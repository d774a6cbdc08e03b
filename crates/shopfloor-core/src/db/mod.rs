//! Database operations and SQLite management for products and steps.
//!
//! This module owns SQLite connections, schema management and the typed
//! queries behind the CRUD surface. The untyped [`Gateway`] abstraction in
//! [`gateway`] is what the lifecycle code is written against; it is
//! implemented for [`rusqlite::Connection`], so it works on a plain
//! connection and inside a transaction alike.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod gateway;
pub mod migrations;
pub mod product_queries;
pub mod step_queries;
pub mod utils;

pub use gateway::{Gateway, Row, WriteSummary};

/// How long a connection waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_busy_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Creates a connection that waits up to `timeout` for competing writers.
    pub fn with_busy_timeout<P: AsRef<Path>>(path: P, timeout: Duration) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(timeout)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database with the full schema.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// The underlying connection, usable as a [`Gateway`].
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}
