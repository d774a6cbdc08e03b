//! Display formatting and result wrapper types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wrappers here add context such as "Created product with ID: 3" or a
//! friendly message for an empty list. Everything renders as markdown so the
//! CLI can hand it to the terminal renderer and the MCP server can return it
//! as text content.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Product, Step) │───▶│ (results,       │───▶│ (terminal, MCP) │
//! │                 │    │  collections)   │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust
//! use shopfloor_core::{
//!     display::{CreateResult, OperationStatus},
//!     models::{Product, ProductStatus},
//! };
//! use jiff::Timestamp;
//!
//! let product = Product {
//!     id: 1,
//!     name: "Walnut desk".to_string(),
//!     description: String::new(),
//!     has_invoice: false,
//!     status: ProductStatus::Pending,
//!     registered_at: Timestamp::now(),
//!     steps: vec![],
//! };
//!
//! let output = CreateResult::new(product).to_string();
//! assert!(output.contains("Created product with ID: 1"));
//!
//! let status = OperationStatus::success("Invoice recorded");
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{History, Products, Steps};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
