//! Core library for the Shopfloor production tracker.
//!
//! Products move through an ordered list of steps. Completing a step marks
//! it done, starts the next pending one, and finalizes the product once no
//! work is left. This crate holds that lifecycle together with storage,
//! validation, notifications and display formatting. The `sf` binary and its
//! MCP server are thin layers on top.
//!
//! # Layout
//!
//! - [`models`]: products, steps, statuses and finalization history
//! - [`params`]: request parameters shared by every interface, with validation
//! - [`db`]: SQLite storage and the untyped [`Gateway`](db::Gateway)
//! - [`lifecycle`]: step transitions and the completion cascade
//! - [`events`]: notifications published after committed changes
//! - [`workshop`]: the async facade tying it all together
//! - [`display`]: markdown rendering of results
//! - [`outcome`]: the tagged result handed to clients
//!
//! # Quick Start
//!
//! ```rust
//! use shopfloor_core::{
//!     lifecycle::CascadeOutcome,
//!     params::{CreateProduct, Id, NewStep},
//!     WorkshopBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::TempDir::new()?;
//! let workshop = WorkshopBuilder::new()
//!     .with_database_path(Some(dir.path().join("shop.db")))
//!     .build()
//!     .await?;
//!
//! let product = workshop
//!     .create_product(&CreateProduct {
//!         name: "Garden bench".to_string(),
//!         steps: vec![NewStep { name: "cut".to_string() }],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let cascade = workshop.complete_step(&Id { id: product.steps[0].id }).await?;
//! assert_eq!(cascade.outcome, CascadeOutcome::Finalized);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod models;
pub mod outcome;
pub mod params;
pub mod workshop;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, History, OperationStatus, Products, Steps, UpdateResult,
};
pub use error::{ErrorKind, Result, ShopError};
pub use events::{BroadcastEmitter, Event, NoopEmitter, NotificationEmitter};
pub use lifecycle::{Cascade, CascadeOutcome};
pub use models::{HistoryEntry, Product, ProductFilter, ProductStatus, Step, StepStatus};
pub use outcome::Outcome;
pub use params::{
    CreateProduct, Id, ListProducts, NewStep, SearchProducts, SetInvoice, StepCreate,
    UpdateProductStatus, UpdateStepStatus,
};
pub use workshop::{Workshop, WorkshopBuilder};
