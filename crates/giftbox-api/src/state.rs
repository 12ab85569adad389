//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use giftbox_auth::jwt::JwtDecoder;
use giftbox_core::config::AppConfig;
use giftbox_core::traits::storage::StorageProvider;
use giftbox_database::Stores;
use giftbox_service::{FolderService, PhotoService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the process started serving
    pub started_at: DateTime<Utc>,

    // ── Infrastructure ───────────────────────────────────────
    /// User, folder and photo stores
    pub stores: Stores,
    /// Photo blob storage
    pub storage: Arc<dyn StorageProvider>,

    // ── Auth ─────────────────────────────────────────────────
    /// Access token validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Accounts and login
    pub user_service: Arc<UserService>,
    /// Folders and the access model
    pub folder_service: Arc<FolderService>,
    /// Photos
    pub photo_service: Arc<PhotoService>,
}
