//! Data models for products and steps.
//!
//! This module contains the core domain models of the shopfloor system.
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation out of the data
//! structures.
//!
//! A [`Product`] is a unit of work that passes through an ordered list of
//! [`Step`]s. Steps are processed in ascending id order: the lifecycle
//! orchestrator in [`crate::lifecycle`] activates the lowest-id pending step
//! whenever a step completes, and finalizes the product once nothing is left
//! unfinished.
//!
//! # Examples
//!
//! ```rust
//! use shopfloor_core::models::{Product, ProductStatus, Step, StepStatus};
//! use jiff::Timestamp;
//!
//! let product = Product {
//!     id: 1,
//!     name: "Oak table".to_string(),
//!     description: String::new(),
//!     has_invoice: false,
//!     status: ProductStatus::Pending,
//!     registered_at: Timestamp::now(),
//!     steps: vec![Step {
//!         id: 10,
//!         product_id: 1,
//!         name: "cut".to_string(),
//!         status: StepStatus::Pending,
//!     }],
//! };
//! println!("{}", product);
//! ```

pub mod filters;
pub mod history;
pub mod product;
pub mod status;
pub mod step;

#[cfg(test)]
mod tests;

pub use filters::ProductFilter;
pub use history::HistoryEntry;
pub use product::Product;
pub use status::{ProductStatus, StepStatus};
pub use step::Step;
