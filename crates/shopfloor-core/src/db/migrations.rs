//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Step rows rely on ON DELETE CASCADE
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        // Products tables created before invoices were tracked lack the flag
        let has_invoice_column: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info('products') WHERE name = 'has_invoice'",
                [],
                |row| row.get(0),
            )
            .map(|count: i64| count > 0)
            .db_context("Failed to inspect products table")?;

        if !has_invoice_column {
            self.connection
                .execute(
                    "ALTER TABLE products ADD COLUMN has_invoice INTEGER NOT NULL DEFAULT 0",
                    [],
                )
                .db_context("Failed to add has_invoice column to products table")?;
        }

        Ok(())
    }
}
