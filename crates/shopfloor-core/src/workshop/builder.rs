//! Builder for creating and configuring Workshop instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use tokio::task;

use super::Workshop;
use crate::{
    db::{Database, DEFAULT_BUSY_TIMEOUT},
    error::{Result, ShopError},
    events::{NoopEmitter, NotificationEmitter},
};

/// Builder for creating and configuring Workshop instances.
#[derive(Clone)]
pub struct WorkshopBuilder {
    database_path: Option<PathBuf>,
    busy_timeout: Duration,
    emitter: Arc<dyn NotificationEmitter>,
}

impl WorkshopBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            emitter: Arc::new(NoopEmitter),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/shopfloor/shopfloor.db` or
    /// `~/.local/share/shopfloor/shopfloor.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// How long an operation waits for a competing writer before failing.
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Where lifecycle events go. Defaults to dropping them.
    pub fn with_emitter(mut self, emitter: Arc<dyn NotificationEmitter>) -> Self {
        self.emitter = emitter;
        self
    }

    /// Builds the configured workshop instance.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `ShopError::Database` if database initialization fails
    pub async fn build(self) -> Result<Workshop> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ShopError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        let busy_timeout = self.busy_timeout;
        task::spawn_blocking(move || {
            let _db = Database::with_busy_timeout(&db_path_clone, busy_timeout)?;
            Ok::<(), ShopError>(())
        })
        .await
        .map_err(ShopError::join)??;

        log::debug!("Workshop ready at {}", db_path.display());

        Ok(Workshop::new(db_path, self.busy_timeout, self.emitter))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("shopfloor")
            .place_data_file("shopfloor.db")
            .map_err(|e| ShopError::XdgDirectory(e.to_string()))
    }
}

impl Default for WorkshopBuilder {
    fn default() -> Self {
        Self::new()
    }
}
