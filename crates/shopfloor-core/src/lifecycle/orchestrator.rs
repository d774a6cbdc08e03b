//! The completion cascade.

use log::{error, info, warn};
use rusqlite::params;

use super::{engine, Cascade, CascadeOutcome};
use crate::{
    db::Gateway,
    error::{Result, ShopError},
    models::{ProductStatus, StepStatus},
};

const SELECT_STEP_PRODUCT_SQL: &str = "SELECT product_id FROM steps WHERE id = ?1";
const SELECT_NEXT_PENDING_SQL: &str =
    "SELECT id FROM steps WHERE product_id = ?1 AND status = ?2 ORDER BY id LIMIT 1";
const COUNT_STEPS_IN_STATUS_SQL: &str =
    "SELECT COUNT(*) AS total FROM steps WHERE product_id = ?1 AND status = ?2";
const COUNT_UNFINISHED_STEPS_SQL: &str =
    "SELECT COUNT(*) AS total FROM steps WHERE product_id = ?1 AND status IN (?2, ?3)";
const SELECT_PRODUCT_STATUS_SQL: &str = "SELECT status FROM products WHERE id = ?1";
const UPDATE_PRODUCT_STATUS_SQL: &str = "UPDATE products SET status = ?1 WHERE id = ?2";
const INSERT_HISTORY_SQL: &str = "INSERT INTO product_history (product_id, name, description, registered_at, finalized_at) SELECT id, name, description, registered_at, ?1 FROM products WHERE id = ?2";

/// Marks a step done and advances or finalizes its product.
///
/// Runs as a straight sequence of gateway calls; wrap it in a transaction to
/// make the cascade atomic.
///
/// # Errors
///
/// * `ShopError::StepNotFound` - When no step has `step_id`; nothing is written
/// * `ShopError::ConsistencyFault` - When the step or its product vanishes
///   mid-cascade
/// * `ShopError::Database` - When any statement fails
pub fn complete_step<G: Gateway + ?Sized>(gateway: &G, step_id: u64) -> Result<Cascade> {
    if engine::set_status(gateway, step_id, StepStatus::Done)? == 0 {
        warn!("Cannot complete step {step_id}: not found");
        return Err(ShopError::StepNotFound { id: step_id });
    }

    let product_id = match gateway.query_one(SELECT_STEP_PRODUCT_SQL, params![step_id as i64])? {
        Some(row) => row.get_u64("product_id")?,
        None => {
            error!("Step {step_id} was updated but its row cannot be read back");
            return Err(ShopError::consistency(format!(
                "Step {step_id} disappeared while being completed"
            )));
        }
    };

    let outcome = match next_pending(gateway, product_id)? {
        Some(next_step_id) => {
            if count_in_status(gateway, product_id, StepStatus::InProgress)? > 0 {
                info!(
                    "Step {step_id} done; product {product_id} already has a step in progress"
                );
                CascadeOutcome::Completed
            } else {
                engine::set_status(gateway, next_step_id, StepStatus::InProgress)?;
                info!("Step {step_id} done; step {next_step_id} started");
                CascadeOutcome::Advanced { next_step_id }
            }
        }
        None if count_unfinished(gateway, product_id)? == 0 => {
            if finalize(gateway, product_id)? {
                info!("Step {step_id} done; product {product_id} finalized");
                CascadeOutcome::Finalized
            } else {
                info!("Step {step_id} done; product {product_id} was already finalized");
                CascadeOutcome::Completed
            }
        }
        None => CascadeOutcome::Completed,
    };

    Ok(Cascade {
        step_id,
        product_id,
        outcome,
    })
}

fn next_pending<G: Gateway + ?Sized>(gateway: &G, product_id: u64) -> Result<Option<u64>> {
    gateway
        .query_one(
            SELECT_NEXT_PENDING_SQL,
            params![product_id as i64, StepStatus::Pending.as_str()],
        )?
        .map(|row| row.get_u64("id"))
        .transpose()
}

fn count_in_status<G: Gateway + ?Sized>(
    gateway: &G,
    product_id: u64,
    status: StepStatus,
) -> Result<u64> {
    count(
        gateway,
        COUNT_STEPS_IN_STATUS_SQL,
        params![product_id as i64, status.as_str()],
    )
}

fn count_unfinished<G: Gateway + ?Sized>(gateway: &G, product_id: u64) -> Result<u64> {
    count(
        gateway,
        COUNT_UNFINISHED_STEPS_SQL,
        params![
            product_id as i64,
            StepStatus::Pending.as_str(),
            StepStatus::InProgress.as_str()
        ],
    )
}

fn count<G: Gateway + ?Sized>(
    gateway: &G,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<u64> {
    gateway
        .query_one(sql, params)?
        .map(|row| row.get_u64("total"))
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Returns `false` when the product was already finalized.
fn finalize<G: Gateway + ?Sized>(gateway: &G, product_id: u64) -> Result<bool> {
    let current = gateway
        .query_one(SELECT_PRODUCT_STATUS_SQL, params![product_id as i64])?
        .map(|row| row.get_text("status").map(str::to_string))
        .transpose()?;

    match current.as_deref() {
        None => {
            error!("Product {product_id} missing while finalizing");
            Err(ShopError::consistency(format!(
                "Product {product_id} not found while finalizing"
            )))
        }
        Some(status) if status == ProductStatus::Finalized.as_str() => Ok(false),
        Some(_) => {
            let updated = gateway.execute(
                UPDATE_PRODUCT_STATUS_SQL,
                params![ProductStatus::Finalized.as_str(), product_id as i64],
            )?;
            if updated.rows_affected == 0 {
                error!("Product {product_id} vanished while finalizing");
                return Err(ShopError::consistency(format!(
                    "Product {product_id} not found while finalizing"
                )));
            }

            gateway.execute(
                INSERT_HISTORY_SQL,
                params![jiff::Timestamp::now().to_string(), product_id as i64],
            )?;
            Ok(true)
        }
    }
}
