//! Single-step primitives over a [`Gateway`].

use log::debug;
use rusqlite::params;

use crate::{
    db::{Gateway, Row},
    error::{Result, ShopError},
    models::{Step, StepStatus},
};

const UPDATE_STEP_STATUS_SQL: &str = "UPDATE steps SET status = ?1 WHERE id = ?2";
const CHECK_PRODUCT_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM products WHERE id = ?1) AS present";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (product_id, name, status) VALUES (?1, ?2, ?3)";
const SELECT_STEPS_BY_PRODUCT_SQL: &str =
    "SELECT id, product_id, name, status FROM steps WHERE product_id = ?1 ORDER BY id";

/// Writes `status` to the step and returns the number of rows changed.
///
/// A missing step is not an error here: the caller sees 0 and decides.
pub fn set_status<G: Gateway + ?Sized>(
    gateway: &G,
    step_id: u64,
    status: StepStatus,
) -> Result<usize> {
    debug!("Setting step {step_id} to {}", status.as_str());
    let summary = gateway.execute(
        UPDATE_STEP_STATUS_SQL,
        params![status.as_str(), step_id as i64],
    )?;
    Ok(summary.rows_affected)
}

/// Inserts a pending step for an existing product and returns its id.
///
/// # Errors
///
/// * `ShopError::InvalidInput` - When `name` is blank
/// * `ShopError::ProductNotFound` - When the product does not exist
pub fn create<G: Gateway + ?Sized>(gateway: &G, product_id: u64, name: &str) -> Result<u64> {
    if name.trim().is_empty() {
        return Err(ShopError::invalid_input("name").with_reason("Name is required"));
    }
    if !product_exists(gateway, product_id)? {
        return Err(ShopError::ProductNotFound { id: product_id });
    }

    let summary = gateway.execute(
        INSERT_STEP_SQL,
        params![product_id as i64, name, StepStatus::Pending.as_str()],
    )?;
    debug!("Created step {} for product {product_id}", summary.last_insert_id);
    Ok(summary.last_insert_id)
}

/// All steps of a product in processing order.
pub fn list_by_product<G: Gateway + ?Sized>(gateway: &G, product_id: u64) -> Result<Vec<Step>> {
    gateway
        .query_all(SELECT_STEPS_BY_PRODUCT_SQL, params![product_id as i64])?
        .iter()
        .map(step_from_row)
        .collect()
}

pub(crate) fn product_exists<G: Gateway + ?Sized>(gateway: &G, product_id: u64) -> Result<bool> {
    let present = gateway
        .query_one(CHECK_PRODUCT_EXISTS_SQL, params![product_id as i64])?
        .map(|row| row.get_u64("present"))
        .transpose()?
        .unwrap_or(0);
    Ok(present != 0)
}

pub(crate) fn step_from_row(row: &Row) -> Result<Step> {
    let status_str = row.get_text("status")?;
    let status = status_str.parse::<StepStatus>().map_err(|e| {
        ShopError::database("Invalid step status in store").with_source(
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, e.into()),
        )
    })?;

    Ok(Step {
        id: row.get_u64("id")?,
        product_id: row.get_u64("product_id")?,
        name: row.get_text("name")?.to_string(),
        status,
    })
}
