//! Photo handlers: multipart upload, listing, download and delete.

use axum::Json;
use axum::body::Body;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use giftbox_core::error::AppError;
use giftbox_service::photo::UploadPhotoRequest;

use crate::dto::response::{ApiResponse, PhotoResponse};
use crate::extractors::path::parse_uuid;
use crate::extractors::{AuthUser, IdPath};
use crate::state::AppState;

/// GET /api/folders/{id}/photos
pub async fn list_folder_photos(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(folder_id): IdPath,
) -> Result<Json<ApiResponse<Vec<PhotoResponse>>>, AppError> {
    let photos = state
        .photo_service
        .list_photos(&auth, Some(folder_id))
        .await?;
    Ok(Json(ApiResponse::ok(
        photos.into_iter().map(PhotoResponse::from).collect(),
    )))
}

/// GET /api/photos
///
/// Photos not filed in any folder.
pub async fn list_unfiled_photos(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<PhotoResponse>>>, AppError> {
    let photos = state.photo_service.list_photos(&auth, None).await?;
    Ok(Json(ApiResponse::ok(
        photos.into_iter().map(PhotoResponse::from).collect(),
    )))
}

/// POST /api/photos
///
/// Multipart fields: `file` (required), `folder_id`, `caption`. Any other
/// field is rejected.
pub async fn upload_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PhotoResponse>>), AppError> {
    let mut folder_id = None;
    let mut caption = None;
    let mut file: Option<(String, String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("photo").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((file_name, mime_type, data));
            }
            "folder_id" => {
                let text = field.text().await.map_err(multipart_error)?;
                let text = text.trim();
                if !text.is_empty() {
                    folder_id = Some(parse_uuid(text)?);
                }
            }
            "caption" => {
                caption = Some(field.text().await.map_err(multipart_error)?);
            }
            other => {
                return Err(AppError::validation(format!(
                    "Unknown multipart field '{other}'"
                )));
            }
        }
    }

    let (file_name, mime_type, data) =
        file.ok_or_else(|| AppError::validation("Missing 'file' field"))?;

    let photo = state
        .photo_service
        .upload_photo(
            &auth,
            UploadPhotoRequest {
                folder_id,
                caption,
                file_name,
                mime_type,
                data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(photo.into()))))
}

/// GET /api/photos/{id}
pub async fn get_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<PhotoResponse>>, AppError> {
    let photo = state.photo_service.get_photo(&auth, id).await?;
    Ok(Json(ApiResponse::ok(photo.into())))
}

/// GET /api/photos/{id}/content
pub async fn download_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    let content = state.photo_service.download_photo(&auth, id).await?;
    let disposition = format!(
        "inline; filename=\"{}\"",
        content.photo.file_name.replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, content.photo.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(content.data),
    )
        .into_response())
}

/// DELETE /api/photos/{id}
pub async fn delete_photo(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    state.photo_service.delete_photo(&auth, id).await?;
    Ok(Json(ApiResponse::ok(serde_json::json!({ "photo_id": id }))))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Upload exceeds the maximum size")
    } else {
        AppError::validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
