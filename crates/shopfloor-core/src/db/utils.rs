//! Row conversion helpers shared by the query modules.

use jiff::Timestamp;
use rusqlite::types::Type;

/// Reads an RFC 3339 timestamp stored as text at `index`.
pub(crate) fn timestamp_at(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Parses a status column with the given `FromStr` implementation.
pub(crate) fn status_at<S>(row: &rusqlite::Row, index: usize) -> rusqlite::Result<S>
where
    S: std::str::FromStr<Err = String>,
{
    let status_str: String = row.get(index)?;
    status_str.parse::<S>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into())
    })
}
