//! Provider selection from configuration.

use std::sync::Arc;

use tracing::info;

use giftbox_core::config::StorageConfig;
use giftbox_core::error::AppError;
use giftbox_core::result::AppResult;
use giftbox_core::traits::storage::StorageProvider;

use crate::providers::{LocalStorageProvider, MemoryStorageProvider};

/// Build the storage provider named by `storage.provider`.
pub async fn create_provider(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    match config.provider.as_str() {
        "local" => {
            let provider = LocalStorageProvider::new(&config.local.root_path).await?;
            info!(root = %config.local.root_path, "Using local blob storage");
            Ok(Arc::new(provider))
        }
        "memory" => {
            info!("Using in-memory blob storage; photos are lost on shutdown");
            Ok(Arc::new(MemoryStorageProvider::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}'"
        ))),
    }
}
