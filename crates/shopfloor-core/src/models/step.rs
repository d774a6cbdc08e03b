//! Step model definition.

use serde::{Deserialize, Serialize};

use super::StepStatus;

/// One task belonging to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step; ascending ids define processing order
    pub id: u64,

    /// ID of the owning product
    pub product_id: u64,

    /// Name of the step
    pub name: String,

    /// Current status of the step
    pub status: StepStatus,
}
