//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    lifecycle::{Cascade, CascadeOutcome},
    models::{HistoryEntry, Product, ProductStatus, Step, StepStatus},
};

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status)?;
        writeln!(
            f,
            "- Invoice: {}",
            if self.has_invoice { "issued" } else { "not issued" }
        )?;
        writeln!(f, "- Registered: {}", LocalDateTime(&self.registered_at))?;
        if !self.steps.is_empty() {
            writeln!(
                f,
                "- Progress: {}/{} steps done",
                self.completed_steps(),
                self.steps.len()
            )?;
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps for this product.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                write!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {}. {} ({})",
            self.id,
            self.name,
            self.status.with_icon()
        )
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (product {})", self.name, self.product_id)?;
        writeln!(f)?;
        if !self.description.is_empty() {
            writeln!(f, "- **Description**: {}", self.description)?;
        }
        writeln!(f, "- **Registered**: {}", LocalDateTime(&self.registered_at))?;
        writeln!(f, "- **Finalized**: {}", LocalDateTime(&self.finalized_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Cascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message())?;
        writeln!(f)?;
        writeln!(f, "- Step: {}", self.step_id)?;
        writeln!(f, "- Product: {}", self.product_id)?;
        match self.outcome {
            CascadeOutcome::Advanced { next_step_id } => {
                writeln!(f, "- Next step: {next_step_id}")
            }
            CascadeOutcome::Finalized => writeln!(f, "- Product status: finalized"),
            CascadeOutcome::Completed => Ok(()),
        }
    }
}
