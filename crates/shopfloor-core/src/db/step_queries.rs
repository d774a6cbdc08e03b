//! Step CRUD operations and the transactional completion cascade.

use rusqlite::{params, TransactionBehavior};

use super::Gateway;
use crate::{
    error::{DatabaseResultExt, Result, ShopError},
    lifecycle::{self, engine, Cascade},
    models::{Step, StepStatus},
};

const SELECT_STEP_BY_ID_SQL: &str = "SELECT id, product_id, name, status FROM steps WHERE id = ?1";
const DELETE_STEP_SQL: &str = "DELETE FROM steps WHERE id = ?1";

impl super::Database {
    /// Appends a pending step to the given product.
    pub fn add_step(&self, product_id: u64, name: &str) -> Result<Step> {
        let id = engine::create(&self.connection, product_id, name)?;

        Ok(Step {
            id,
            product_id,
            name: name.into(),
            status: StepStatus::Pending,
        })
    }

    /// Retrieves a step by its ID.
    pub fn get_step(&self, step_id: u64) -> Result<Option<Step>> {
        Gateway::query_one(&self.connection, SELECT_STEP_BY_ID_SQL, params![step_id as i64])?
            .map(|row| engine::step_from_row(&row))
            .transpose()
    }

    /// Lists the steps of a product in processing order.
    ///
    /// # Errors
    ///
    /// * `ShopError::ProductNotFound` - When the product does not exist
    pub fn get_steps(&self, product_id: u64) -> Result<Vec<Step>> {
        if !engine::product_exists(&self.connection, product_id)? {
            return Err(ShopError::ProductNotFound { id: product_id });
        }
        engine::list_by_product(&self.connection, product_id)
    }

    /// Sets a step's status without running the cascade.
    pub fn update_step_status(&self, step_id: u64, status: StepStatus) -> Result<Option<Step>> {
        if engine::set_status(&self.connection, step_id, status)? == 0 {
            return Ok(None);
        }
        self.get_step(step_id)
    }

    /// Permanently deletes a step.
    pub fn remove_step(&self, step_id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_STEP_SQL, params![step_id as i64])
            .db_context("Failed to delete step")?;

        if deleted == 0 {
            return Err(ShopError::StepNotFound { id: step_id });
        }
        Ok(())
    }

    /// Completes a step and runs the cascade atomically.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, so concurrent
    /// cascades queue on the busy timeout instead of interleaving. Any error
    /// rolls back every write, including the step's own `done`.
    pub fn complete_step(&mut self, step_id: u64) -> Result<Cascade> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let cascade = lifecycle::complete_step(&*tx, step_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(cascade)
    }
}
