//! Parameter structures for shopfloor operations
//!
//! This module contains shared parameter structures used across the
//! interfaces (CLI, MCP) without framework-specific derives. Interface layers
//! wrap them with their own derives (clap `Args`, MCP JSON schema) and convert
//! into these types.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Validation that does not need storage (blank names, status strings outside
//! the enumerations) happens here, through the `validate` methods, before any
//! query runs.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, ShopError},
    models::{ProductStatus, StepStatus},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// A step declared inline when creating a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct NewStep {
    /// Name of the step (required)
    pub name: String,
}

/// Parameters for creating a new product.
///
/// Inline steps are inserted in declaration order, which becomes their
/// processing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateProduct {
    /// Name of the product (required)
    pub name: String,
    /// Optional description of the product
    pub description: Option<String>,
    /// Whether an invoice has already been issued
    #[serde(default)]
    pub has_invoice: bool,
    /// Steps to create together with the product, in processing order
    #[serde(default)]
    pub steps: Vec<NewStep>,
}

impl CreateProduct {
    /// Validate required fields.
    ///
    /// # Errors
    ///
    /// * `ShopError::InvalidInput` - When the product name or any step name
    ///   is blank
    ///
    /// ```rust
    /// use shopfloor_core::params::{CreateProduct, NewStep};
    ///
    /// let params = CreateProduct {
    ///     name: "Chair".to_string(),
    ///     steps: vec![NewStep { name: " ".to_string() }],
    ///     ..Default::default()
    /// };
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        require_name("name", &self.name)?;
        for (index, step) in self.steps.iter().enumerate() {
            require_name(&format!("steps[{index}].name"), &step.name)?;
        }
        Ok(())
    }
}

/// Parameters for listing products.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListProducts {
    /// Only list products in this status ('pending' or 'finalized')
    pub status: Option<String>,
}

impl ListProducts {
    /// Parse the optional status filter.
    pub fn validate(&self) -> Result<Option<ProductStatus>> {
        self.status.as_deref().map(parse_product_status).transpose()
    }
}

/// Parameters for searching products by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SearchProducts {
    /// Case-insensitive fragment of the product name
    pub query: String,
}

impl SearchProducts {
    /// Reject blank search terms.
    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(ShopError::invalid_input("query").with_reason("Search term is required"));
        }
        Ok(())
    }
}

/// Parameters for setting a product's status directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateProductStatus {
    /// Product ID to update
    pub id: u64,
    /// New status ('pending' or 'finalized')
    pub status: String,
}

impl UpdateProductStatus {
    /// Parse the requested status.
    pub fn validate(&self) -> Result<ProductStatus> {
        parse_product_status(&self.status)
    }
}

/// Parameters for setting the invoice flag of a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetInvoice {
    /// Product ID to update
    pub id: u64,
    /// Whether an invoice has been issued
    pub has_invoice: bool,
}

/// Parameters for appending a step to an existing product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepCreate {
    /// ID of the product to add the step to
    pub product_id: u64,
    /// Name of the step (required)
    pub name: String,
}

impl StepCreate {
    /// Validate required fields.
    pub fn validate(&self) -> Result<()> {
        require_name("name", &self.name)
    }
}

/// Parameters for setting a step's status directly.
///
/// This bypasses the lifecycle cascade; use step completion to advance a
/// product through its steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateStepStatus {
    /// Step ID to update
    pub id: u64,
    /// New status ('pending', 'in_progress', or 'done')
    pub status: String,
}

impl UpdateStepStatus {
    /// Parse the requested status.
    ///
    /// ```rust
    /// use shopfloor_core::{models::StepStatus, params::UpdateStepStatus};
    ///
    /// let params = UpdateStepStatus { id: 1, status: "in_progress".to_string() };
    /// assert_eq!(params.validate()?, StepStatus::InProgress);
    /// # Ok::<(), shopfloor_core::ShopError>(())
    /// ```
    pub fn validate(&self) -> Result<StepStatus> {
        if self.status.trim().is_empty() {
            return Err(ShopError::invalid_input("status").with_reason("Status is required"));
        }
        self.status.parse::<StepStatus>().map_err(|_| {
            ShopError::invalid_input("status").with_reason(format!(
                "Invalid status: {}. Must be 'pending', 'in_progress', or 'done'",
                self.status
            ))
        })
    }
}

fn require_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ShopError::invalid_input(field).with_reason("Name is required"));
    }
    Ok(())
}

fn parse_product_status(value: &str) -> Result<ProductStatus> {
    if value.trim().is_empty() {
        return Err(ShopError::invalid_input("status").with_reason("Status is required"));
    }
    value.parse::<ProductStatus>().map_err(|_| {
        ShopError::invalid_input("status").with_reason(format!(
            "Invalid status: {value}. Must be 'pending' or 'finalized'"
        ))
    })
}
