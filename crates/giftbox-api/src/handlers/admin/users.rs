//! Admin user listing.

use axum::Json;
use axum::extract::{Query, State};

use giftbox_core::error::AppError;
use giftbox_core::types::pagination::PageResponse;

use crate::dto::response::{ApiResponse, UserResponse, page_of};
use crate::extractors::{AuthUser, PaginationParams};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, AppError> {
    require_admin(&auth)?;
    let users = state
        .user_service
        .list_users(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page_of(users))))
}
