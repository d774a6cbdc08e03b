//! Step lifecycle: status transitions and the completion cascade.
//!
//! [`engine`] holds the single-step primitives (create, list, set status).
//! [`orchestrator`] composes them into [`complete_step`], the one operation
//! that moves a product forward:
//!
//! ```text
//! complete_step(S)
//!   ├─ S := done                      (0 rows → StepNotFound)
//!   ├─ P := product of S
//!   ├─ N := lowest-id pending step of P
//!   ├─ N exists, nothing in progress → N := in_progress   → Advanced
//!   ├─ N exists, another in progress →                     Completed
//!   ├─ no pending, none unfinished   → P := finalized     → Finalized
//!   │    (P already finalized         →                     Completed)
//!   └─ otherwise                     →                     Completed
//! ```
//!
//! Both modules are written against [`Gateway`](crate::db::Gateway) so the
//! caller decides the transaction boundary. [`Database::complete_step`]
//! runs the cascade inside one `BEGIN IMMEDIATE` transaction.
//!
//! [`Database::complete_step`]: crate::db::Database::complete_step

use serde::{Deserialize, Serialize};

pub mod engine;
pub mod orchestrator;

pub use orchestrator::complete_step;

/// What the cascade did after marking a step done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CascadeOutcome {
    /// The next pending step was moved to in progress
    Advanced { next_step_id: u64 },
    /// No unfinished steps remained and the product was finalized
    Finalized,
    /// No step was started and the product status did not change.
    ///
    /// Besides "steps still in progress", this covers a pending step left
    /// waiting because another step is already in progress, and a product
    /// that was finalized before.
    Completed,
}

impl CascadeOutcome {
    /// Human-readable summary of the outcome.
    pub fn message(&self) -> &'static str {
        match self {
            CascadeOutcome::Advanced { .. } => "Step completed. Next step started.",
            CascadeOutcome::Finalized => "Step completed. Product finalized.",
            CascadeOutcome::Completed => "Step completed. No other step started.",
        }
    }
}

/// Result of completing a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cascade {
    /// The step that was completed
    pub step_id: u64,
    /// The product that owns it
    pub product_id: u64,
    /// What happened next
    #[serde(flatten)]
    pub outcome: CascadeOutcome,
}

impl Cascade {
    /// Human-readable summary of what happened.
    pub fn message(&self) -> &'static str {
        self.outcome.message()
    }

    /// Whether this completion finalized the product.
    pub fn finalized(&self) -> bool {
        matches!(self.outcome, CascadeOutcome::Finalized)
    }
}
