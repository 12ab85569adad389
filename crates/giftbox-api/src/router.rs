//! Route definitions for the Giftbox HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Room for multipart framing on top of the photo itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(folder_routes())
        .merge(photo_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Registration, login, current user
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Folder CRUD, secret management, verification, cascade delete
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folder::get_folder)
                .put(handlers::folder::rename_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/{id}/secret", put(handlers::folder::set_secret))
        .route("/folders/{id}/verify", post(handlers::folder::verify_folder))
        .route("/folders/{id}/photos", get(handlers::photo::list_folder_photos))
}

/// Photo upload, listing, download, delete
fn photo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/photos",
            get(handlers::photo::list_unfiled_photos).post(handlers::photo::upload_photo),
        )
        .route(
            "/photos/{id}",
            get(handlers::photo::get_photo).delete(handlers::photo::delete_photo),
        )
        .route("/photos/{id}/content", get(handlers::photo::download_photo))
}

/// Admin endpoints
fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/users", get(handlers::admin::users::list_users))
}

/// Health check (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
