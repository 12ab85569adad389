//! Application builder: wires stores, storage and services into the
//! router.

use std::sync::Arc;

use axum::Router;
use chrono::Utc;
use tracing::info;

use giftbox_auth::jwt::JwtDecoder;
use giftbox_core::config::AppConfig;
use giftbox_core::result::AppResult;
use giftbox_core::traits::storage::StorageProvider;
use giftbox_database::Stores;
use giftbox_service::{FolderService, PhotoService, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state from already-opened stores and storage.
pub fn build_state(
    config: AppConfig,
    stores: Stores,
    storage: Arc<dyn StorageProvider>,
) -> AppState {
    let user_service = Arc::new(UserService::new(Arc::clone(&stores.users), &config.auth));
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&stores.folders),
        Arc::clone(&stores.photos),
        Arc::clone(&storage),
    ));
    let photo_service = Arc::new(PhotoService::new(
        Arc::clone(&stores.folders),
        Arc::clone(&stores.photos),
        Arc::clone(&storage),
        config.storage.max_upload_size_bytes,
    ));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    AppState {
        config: Arc::new(config),
        started_at: Utc::now(),
        stores,
        storage,
        jwt_decoder,
        user_service,
        folder_service,
        photo_service,
    }
}

/// Opens the configured database and blob storage, builds the state, and
/// creates the bootstrap admin if one is configured.
pub async fn initialize(config: AppConfig) -> AppResult<AppState> {
    info!(provider = %config.database.provider, "Opening stores");
    let stores = giftbox_database::open_stores(&config.database).await?;

    info!(provider = %config.storage.provider, "Initializing blob storage");
    let storage = giftbox_storage::create_provider(&config.storage).await?;

    let state = build_state(config, stores, storage);

    if let Some(admin) = state.config.auth.bootstrap_admin.as_ref() {
        state.user_service.ensure_admin(admin).await?;
    }

    Ok(state)
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
