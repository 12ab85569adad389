//! # giftbox-database
//!
//! Persistence for Giftbox. The [`store`] traits are what the service
//! layer consumes; [`repositories`] implements them on PostgreSQL and
//! [`memory`] implements them in process for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use tracing::info;

use giftbox_core::config::DatabaseConfig;
use giftbox_core::error::AppError;
use giftbox_core::result::AppResult;

pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use store::{FolderStore, PhotoStore, UserStore};

/// The set of stores handed to the service layer.
#[derive(Debug, Clone)]
pub struct Stores {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Folders.
    pub folders: Arc<dyn FolderStore>,
    /// Photos.
    pub photos: Arc<dyn PhotoStore>,
    /// The PostgreSQL pool, when the `postgres` provider is in use.
    pub pool: Option<DatabasePool>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            users: Arc::new(repositories::UserRepository::new(pg.clone())),
            folders: Arc::new(repositories::FolderRepository::new(pg.clone())),
            photos: Arc::new(repositories::PhotoRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Stores backed by a fresh in-memory database.
    pub fn memory() -> Self {
        let db = MemoryDatabase::new();
        Self {
            users: Arc::new(db.users()),
            folders: Arc::new(db.folders()),
            photos: Arc::new(db.photos()),
            pool: None,
        }
    }

    /// Check connectivity of the underlying database.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }
}

/// Open the stores selected by `database.provider`, running migrations
/// for PostgreSQL.
pub async fn open_stores(config: &DatabaseConfig) -> AppResult<Stores> {
    match config.provider.as_str() {
        "postgres" => {
            let pool = DatabasePool::connect(config).await?;
            migration::run_migrations(pool.pool()).await?;
            Ok(Stores::postgres(pool))
        }
        "memory" => {
            info!("Using in-memory store; data is lost on shutdown");
            Ok(Stores::memory())
        }
        other => Err(AppError::configuration(format!(
            "Unknown database provider '{other}'"
        ))),
    }
}
