//! Step operations for the Workshop.

use log::debug;

use super::Workshop;
use crate::{
    display::Steps,
    error::{Result, ShopError},
    events::{PRODUCT_FINALIZED, STEP_COMPLETED},
    lifecycle::Cascade,
    models::Step,
    params::{Id, StepCreate, UpdateStepStatus},
};

impl Workshop {
    /// Appends a pending step to an existing product.
    pub async fn add_step(&self, params: &StepCreate) -> Result<Step> {
        params.validate()?;

        let product_id = params.product_id;
        let name = params.name.clone();
        self.with_database(move |db| db.add_step(product_id, &name))
            .await
    }

    /// Retrieves a step by its ID.
    pub async fn get_step(&self, params: &Id) -> Result<Step> {
        let id = params.id;
        self.with_database(move |db| db.get_step(id))
            .await?
            .ok_or(ShopError::StepNotFound { id })
    }

    /// Lists a product's steps in processing order.
    pub async fn list_steps(&self, params: &Id) -> Result<Steps> {
        let product_id = params.id;
        let steps = self.with_database(move |db| db.get_steps(product_id)).await?;
        Ok(Steps(steps))
    }

    /// Sets a step's status directly, without running the cascade.
    pub async fn update_step_status(&self, params: &UpdateStepStatus) -> Result<Step> {
        let status = params.validate()?;
        let id = params.id;
        self.with_database(move |db| db.update_step_status(id, status))
            .await?
            .ok_or(ShopError::StepNotFound { id })
    }

    /// Permanently deletes a step, returning what was removed.
    pub async fn remove_step(&self, params: &Id) -> Result<Step> {
        let id = params.id;
        self.with_database(move |db| {
            let step = db.get_step(id)?.ok_or(ShopError::StepNotFound { id })?;
            db.remove_step(id)?;
            Ok(step)
        })
        .await
    }

    /// Completes a step and advances or finalizes its product.
    ///
    /// The cascade commits atomically before any event is published:
    /// `step_completed` always, then `product_finalized` when the product
    /// reached its final status.
    ///
    /// # Errors
    ///
    /// * `ShopError::StepNotFound` - When the step does not exist; nothing is
    ///   written
    /// * `ShopError::ConsistencyFault` - When the store contradicts the
    ///   lifecycle invariants; the cascade is rolled back
    pub async fn complete_step(&self, params: &Id) -> Result<Cascade> {
        let step_id = params.id;
        debug!("Completing step {step_id}");

        let (cascade, finalized) = self
            .with_database(move |db| {
                let cascade = db.complete_step(step_id)?;
                let finalized = if cascade.finalized() {
                    db.get_product(cascade.product_id)?
                } else {
                    None
                };
                Ok((cascade, finalized))
            })
            .await?;

        self.publish(STEP_COMPLETED, &cascade);
        if let Some(product) = finalized {
            self.publish(PRODUCT_FINALIZED, &product);
        }

        Ok(cascade)
    }
}
