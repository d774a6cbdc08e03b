//! High-level workshop API for managing products and steps.
//!
//! [`Workshop`] is the async entry point used by the CLI and the MCP server.
//! Every operation opens its own [`Database`] connection on tokio's blocking
//! pool, so concurrent requests never share a connection and a long cascade
//! never stalls the runtime.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Workshop     │    │    Database     │    │   Lifecycle     │
//! │ (product_ops,   │───▶│ (product and    │───▶│ (engine and     │
//! │  step_ops)      │    │  step queries)  │    │  orchestrator)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   validation, events     transactions          cascade rules
//! ```
//!
//! Events are published only after the underlying transaction commits.
//!
//! # Examples
//!
//! ```rust
//! use shopfloor_core::{
//!     params::{CreateProduct, Id, NewStep},
//!     WorkshopBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let workshop = WorkshopBuilder::new()
//!     .with_database_path(Some("/tmp/shopfloor-example.db"))
//!     .build()
//!     .await?;
//!
//! let product = workshop
//!     .create_product(&CreateProduct {
//!         name: "Oak table".to_string(),
//!         steps: vec![
//!             NewStep { name: "cut".to_string() },
//!             NewStep { name: "sand".to_string() },
//!         ],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let cascade = workshop.complete_step(&Id { id: product.steps[0].id }).await?;
//! println!("{}", cascade.message());
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use log::warn;
use tokio::task;

use crate::{
    db::Database,
    error::{Result, ShopError},
    events::{Event, NotificationEmitter},
};

pub mod builder;
pub mod product_ops;
pub mod step_ops;


pub use builder::WorkshopBuilder;

/// Main interface for managing products and steps.
pub struct Workshop {
    pub(crate) db_path: PathBuf,
    pub(crate) busy_timeout: Duration,
    pub(crate) emitter: Arc<dyn NotificationEmitter>,
}

impl Workshop {
    /// Creates a workshop over an initialized database file.
    pub(crate) fn new(
        db_path: PathBuf,
        busy_timeout: Duration,
        emitter: Arc<dyn NotificationEmitter>,
    ) -> Self {
        Self {
            db_path,
            busy_timeout,
            emitter,
        }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `operation` on a fresh connection on the blocking pool.
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        task::spawn_blocking(move || {
            let mut db = Database::with_busy_timeout(&db_path, busy_timeout)?;
            operation(&mut db)
        })
        .await
        .map_err(ShopError::join)?
    }

    fn publish(&self, name: &str, payload: &impl serde::Serialize) {
        match Event::new(name, payload) {
            Ok(event) => self.emitter.publish(&event),
            Err(e) => warn!("Dropping {name} event: {e}"),
        }
    }
}
