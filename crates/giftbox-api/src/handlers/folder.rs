//! Folder handlers: CRUD, secret management, verification and cascade
//! delete.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use giftbox_core::error::AppError;
use giftbox_core::types::pagination::PageResponse;
use giftbox_service::folder::CreateFolderRequest as SvcCreateFolder;

use crate::dto::request::{
    CreateFolderRequest, DeleteFolderRequest, RenameFolderRequest, SetSecretRequest,
    VerifySecretRequest,
};
use crate::dto::response::{
    ApiResponse, FolderDeletionResponse, FolderResponse, VerifyResponse, page_of,
};
use crate::extractors::{AuthUser, IdPath, OptionalJson, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<FolderResponse>>>, AppError> {
    let folders = state
        .folder_service
        .list_folders(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page_of(folders))))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FolderResponse>>), AppError> {
    let folder = state
        .folder_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                secret: req.secret,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder.into()))))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<FolderResponse>>, AppError> {
    let details = state.folder_service.get_folder_details(&auth, id).await?;
    Ok(Json(ApiResponse::ok(details.into())))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<RenameFolderRequest>,
) -> Result<Json<ApiResponse<FolderResponse>>, AppError> {
    let folder = state
        .folder_service
        .rename_folder(&auth, id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(folder.into())))
}

/// PUT /api/folders/{id}/secret
pub async fn set_secret(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<SetSecretRequest>,
) -> Result<Json<ApiResponse<FolderResponse>>, AppError> {
    let folder = state
        .folder_service
        .set_secret(
            &auth,
            id,
            req.current_secret.as_deref(),
            req.new_secret.as_deref(),
        )
        .await?;
    Ok(Json(ApiResponse::ok(folder.into())))
}

/// POST /api/folders/{id}/verify
pub async fn verify_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(req): ValidatedJson<VerifySecretRequest>,
) -> Result<Json<ApiResponse<VerifyResponse>>, AppError> {
    let folder = state
        .folder_service
        .verify_access(&auth, id, &req.secret)
        .await?;
    Ok(Json(ApiResponse::ok(VerifyResponse {
        folder_id: folder.id,
        verified: true,
    })))
}

/// DELETE /api/folders/{id}
///
/// Protected folders need `{"secret": "..."}` in the body.
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
    OptionalJson(body): OptionalJson<DeleteFolderRequest>,
) -> Result<Json<ApiResponse<FolderDeletionResponse>>, AppError> {
    let secret = body.and_then(|b| b.secret);
    let deletion = state
        .folder_service
        .delete_folder(&auth, id, secret.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(deletion.into())))
}
