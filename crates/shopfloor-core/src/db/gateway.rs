//! Untyped persistence gateway.
//!
//! The lifecycle code never sees typed query builders. It issues
//! parameterized SQL through [`Gateway`] and gets back either write metadata
//! ([`WriteSummary`]) or owned rows ([`Row`]). Because the trait is
//! implemented for [`Connection`], the same code runs on a bare connection and
//! on a transaction (via `&*tx`).

use rusqlite::{
    types::{Type, Value},
    Connection, ToSql,
};

use crate::error::{DatabaseResultExt, Result, ShopError};

/// Metadata returned by a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteSummary {
    /// Row id of the most recent successful INSERT on the connection
    pub last_insert_id: u64,
    /// Number of rows changed by the statement
    pub rows_affected: usize,
}

/// One result row with its column names.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Builds a row from parallel column and value lists.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Raw value of the named column.
    pub fn value(&self, column: &str) -> Result<&Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.values.get(index))
            .ok_or_else(|| {
                ShopError::database(format!("Missing column '{column}'"))
                    .with_source(rusqlite::Error::InvalidColumnName(column.to_string()))
            })
    }

    /// Integer column interpreted as an id or count.
    pub fn get_u64(&self, column: &str) -> Result<u64> {
        match self.value(column)? {
            Value::Integer(n) if *n >= 0 => Ok(*n as u64),
            other => Err(self.type_error(column, other.data_type())),
        }
    }

    /// Text column.
    pub fn get_text(&self, column: &str) -> Result<&str> {
        match self.value(column)? {
            Value::Text(text) => Ok(text.as_str()),
            other => Err(self.type_error(column, other.data_type())),
        }
    }

    fn type_error(&self, column: &str, found: Type) -> ShopError {
        let index = self
            .columns
            .iter()
            .position(|name| name == column)
            .unwrap_or_default();
        ShopError::database(format!("Unexpected type for column '{column}'")).with_source(
            rusqlite::Error::InvalidColumnType(index, column.to_string(), found),
        )
    }
}

/// Executes parameterized statements on behalf of the lifecycle code.
pub trait Gateway {
    /// Runs a write statement.
    fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> Result<WriteSummary>;

    /// Runs a query and returns its first row, if any.
    fn query_one(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Option<Row>>;

    /// Runs a query and returns every row.
    fn query_all(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>>;
}

impl Gateway for Connection {
    fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> Result<WriteSummary> {
        let rows_affected =
            Connection::execute(self, sql, params).db_context("Failed to execute statement")?;
        Ok(WriteSummary {
            last_insert_id: self.last_insert_rowid() as u64,
            rows_affected,
        })
    }

    fn query_one(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Option<Row>> {
        Ok(Gateway::query_all(self, sql, params)?.into_iter().next())
    }

    fn query_all(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Row>> {
        let mut stmt = self.prepare(sql).db_context("Failed to prepare query")?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let width = columns.len();

        let values = stmt
            .query_map(params, |row| {
                (0..width)
                    .map(|index| row.get::<_, Value>(index))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .db_context("Failed to run query")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read query results")?;

        Ok(values
            .into_iter()
            .map(|values| Row::new(columns.clone(), values))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::params;

    use super::*;

    fn scratch() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT)")
            .unwrap();
        conn
    }

    #[test]
    fn test_execute_reports_insert_metadata() {
        let conn = scratch();
        let summary = Gateway::execute(&conn, "INSERT INTO items (label) VALUES (?1)", params!["a"])
            .unwrap();
        assert_eq!(summary.rows_affected, 1);
        assert_eq!(summary.last_insert_id, 1);

        let summary = Gateway::execute(&conn, "UPDATE items SET label = ?1 WHERE id = ?2", params!["b", 99])
            .unwrap();
        assert_eq!(summary.rows_affected, 0);
    }

    #[test]
    fn test_query_rows_by_column_name() {
        let conn = scratch();
        for label in ["x", "y"] {
            Gateway::execute(&conn, "INSERT INTO items (label) VALUES (?1)", params![label])
                .unwrap();
        }

        let rows = Gateway::query_all(&conn, "SELECT id, label FROM items ORDER BY id", params![])
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get_u64("id").unwrap(), 2);
        assert_eq!(rows[1].get_text("label").unwrap(), "y");

        let none = Gateway::query_one(&conn, "SELECT id FROM items WHERE id = ?1", params![42])
            .unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_row_accessor_errors() {
        let conn = scratch();
        Gateway::execute(&conn, "INSERT INTO items (label) VALUES (NULL)", params![]).unwrap();
        let row = Gateway::query_one(&conn, "SELECT id, label FROM items", params![])
            .unwrap()
            .unwrap();

        assert!(matches!(
            row.get_text("label"),
            Err(ShopError::Database {
                source: rusqlite::Error::InvalidColumnType(1, _, Type::Null),
                ..
            })
        ));
        assert!(matches!(
            row.get_u64("missing"),
            Err(ShopError::Database {
                source: rusqlite::Error::InvalidColumnName(_),
                ..
            })
        ));
    }
}
