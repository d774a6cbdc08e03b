//! Product model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ProductStatus, Step, StepStatus};

/// A work item that must pass through an ordered sequence of steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique identifier for the product
    pub id: u64,

    /// Name of the product
    pub name: String,

    /// Free-form description, empty when not provided
    #[serde(default)]
    pub description: String,

    /// Whether an invoice has been issued for the product
    #[serde(default)]
    pub has_invoice: bool,

    /// Lifecycle status of the product
    #[serde(default)]
    pub status: ProductStatus,

    /// Timestamp when the product was registered (UTC)
    pub registered_at: Timestamp,

    /// Steps in processing order (loaded on single-product reads)
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Product {
    /// Number of steps already done.
    pub fn completed_steps(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Done)
            .count()
    }

    /// The step currently being worked on, if any.
    pub fn active_step(&self) -> Option<&Step> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::InProgress)
    }
}
