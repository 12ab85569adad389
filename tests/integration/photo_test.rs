//! Integration tests for photo upload, listing, download and delete.

mod helpers;

use axum::http::{StatusCode, header};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

#[tokio::test]
async fn test_upload_unfiled_photo() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;

    let response = app
        .upload_photo(&token, None, "sunset.png", "image/png", PNG_BYTES)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["file_name"], "sunset.png");
    assert_eq!(response.body["data"]["caption"], "from the tests");
    assert!(response.body["data"]["folder_id"].is_null());
    assert_eq!(response.body["data"]["size_bytes"], PNG_BYTES.len());

    let listing = app.request("GET", "/api/photos", None, Some(&token)).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_upload_into_folder_and_list() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;
    let folder_id = app.create_folder(&token, "Beach", None).await;

    app.upload_photo(&token, Some(folder_id), "a.png", "image/png", PNG_BYTES)
        .await;
    app.upload_photo(&token, Some(folder_id), "b.jpg", "image/jpeg", PNG_BYTES)
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{folder_id}/photos"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(2));

    let unfiled = app.request("GET", "/api/photos", None, Some(&token)).await;
    assert_eq!(unfiled.body["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_upload_into_someone_elses_folder() {
    let app = helpers::TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let folder_id = app.create_folder(&alice, "Private", None).await;

    let response = app
        .upload_photo(&bob, Some(folder_id), "a.png", "image/png", PNG_BYTES)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(app.blobs.is_empty());

    let response = app
        .request(
            "GET",
            &format!("/api/folders/{folder_id}/photos"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_upload_rejects_non_images() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;

    let response = app
        .upload_photo(&token, None, "notes.txt", "text/plain", b"hello")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION");
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_upload_too_large() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;
    let data = vec![0u8; helpers::MAX_UPLOAD_BYTES as usize + 1];

    let response = app
        .upload_photo(&token, None, "big.png", "image/png", &data)
        .await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.code(), "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn test_download_photo() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;
    let photo_id = app
        .upload_photo(&token, None, "sunset.png", "image/png", PNG_BYTES)
        .await
        .id();

    let response = app
        .get_raw(&format!("/api/photos/{photo_id}/content"), &token)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(&response.body[..], PNG_BYTES);

    let bob = app.member("bob").await;
    let response = app
        .get_raw(&format!("/api/photos/{photo_id}/content"), &bob)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_photo() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;
    let photo_id = app
        .upload_photo(&token, None, "sunset.png", "image/png", PNG_BYTES)
        .await
        .id();
    let path = format!("/api/photos/{photo_id}");

    let bob = app.member("bob").await;
    let response = app.request("DELETE", &path, None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(app.blobs.is_empty());

    let response = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_rejects_unknown_fields() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;

    let response = app
        .post_form(
            &token,
            &[("tags", "beach")],
            Some(("sunset.png", "image/png", PNG_BYTES)),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION");
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_upload_requires_file_field() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;

    let response = app.post_form(&token, &[("caption", "no file")], None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "VALIDATION");
}
