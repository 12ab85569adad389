//! Integration tests for folders and the protected-folder access model.

mod helpers;

use axum::http::StatusCode;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

#[tokio::test]
async fn test_create_and_list_folders() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;

    app.create_folder(&token, "Holidays", None).await;
    app.create_folder(&token, "Birthdays", Some("cake-and-candles")).await;

    let response = app.request("GET", "/api/folders", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 2);

    let items = response.body["data"]["items"]
        .as_array()
        .expect("items array");
    let by_name = |name: &str| {
        items
            .iter()
            .find(|f| f["name"] == name)
            .expect("folder listed")
    };
    assert_eq!(by_name("Birthdays")["is_protected"], true);
    assert_eq!(by_name("Birthdays")["access"], "protected");
    assert_eq!(by_name("Holidays")["is_protected"], false);
    assert!(items.iter().all(|f| f.get("secret_hash").is_none()));
}

#[tokio::test]
async fn test_folders_are_private_to_their_owner() {
    let app = helpers::TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let folder_id = app.create_folder(&alice, "Mine", None).await;

    let response = app.request("GET", "/api/folders", None, Some(&bob)).await;
    assert_eq!(response.body["data"]["total_items"], 0);

    let path = format!("/api/folders/{folder_id}");
    let response = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.code(), "AUTHORIZATION");

    let response = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({ "name": "Stolen" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_folder_includes_photo_count() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;
    let folder_id = app.create_folder(&token, "Trips", Some("passport-stamp")).await;
    app.upload_photo(&token, Some(folder_id), "a.png", "image/png", PNG_BYTES)
        .await;

    let response = app
        .request("GET", &format!("/api/folders/{folder_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["photo_count"], 1);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;
    let folder_id = app.create_folder(&token, "Old", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{folder_id}"),
            Some(serde_json::json!({ "name": "New" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "New");
}

#[tokio::test]
async fn test_malformed_folder_id() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;

    let response = app
        .request("GET", "/api/folders/not-a-uuid", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.code(), "VALIDATION");
}

#[tokio::test]
async fn test_verify_folder_secret() {
    let app = helpers::TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let protected = app.create_folder(&alice, "Vault", Some("open-sesame")).await;
    let open = app.create_folder(&alice, "Open", None).await;

    let verify = |id: uuid::Uuid| format!("/api/folders/{id}/verify");

    let response = app
        .request(
            "POST",
            &verify(protected),
            Some(serde_json::json!({ "secret": "open-sesame" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["verified"], true);

    let response = app
        .request(
            "POST",
            &verify(protected),
            Some(serde_json::json!({ "secret": "wrong" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.code(), "AUTHENTICATION");

    let response = app
        .request(
            "POST",
            &verify(protected),
            Some(serde_json::json!({ "secret": "open-sesame" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &verify(open),
            Some(serde_json::json!({ "secret": "anything" })),
            Some(&alice),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.code(), "BAD_REQUEST");
}

#[tokio::test]
async fn test_change_and_clear_secret() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;
    let folder_id = app.create_folder(&token, "Vault", Some("first-secret")).await;
    let path = format!("/api/folders/{folder_id}/secret");

    let response = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({ "new_secret": "second-secret" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({
                "current_secret": "wrong",
                "new_secret": "second-secret",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({
                "current_secret": "first-secret",
                "new_secret": "second-secret",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_protected"], true);

    let response = app
        .request(
            "PUT",
            &path,
            Some(serde_json::json!({
                "current_secret": "second-secret",
                "new_secret": null,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_protected"], false);
}

#[tokio::test]
async fn test_protected_folder_deletion() {
    let app = helpers::TestApp::new();
    let alice = app.member("alice").await;
    let bob = app.member("bob").await;
    let folder_id = app.create_folder(&alice, "Vault", Some("open-sesame")).await;

    let first = app
        .upload_photo(&alice, Some(folder_id), "a.png", "image/png", PNG_BYTES)
        .await;
    let second = app
        .upload_photo(&alice, Some(folder_id), "b.png", "image/png", PNG_BYTES)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(app.blobs.len(), 2);

    let path = format!("/api/folders/{folder_id}");
    let with_secret = |secret: &str| Some(serde_json::json!({ "secret": secret }));

    // Not the owner: rejected before the secret is looked at.
    let response = app
        .request("DELETE", &path, with_secret("open-sesame"), Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &path, with_secret("wrong"), Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("DELETE", &path, None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.blobs.len(), 2);

    let response = app
        .request("DELETE", &path, with_secret("open-sesame"), Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["photos_removed"], 2);
    assert_eq!(response.body["data"]["storage_cleanup_failures"], 0);

    let response = app.request("GET", &path, None, Some(&alice)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/api/photos/{}", first.id()), None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_unprotected_folder_deletion() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;
    let folder_id = app.create_folder(&token, "Scratch", None).await;
    app.upload_photo(&token, Some(folder_id), "a.png", "image/png", PNG_BYTES)
        .await;

    let response = app
        .request("DELETE", &format!("/api/folders/{folder_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["photos_removed"], 1);
    assert!(app.blobs.is_empty());
}

#[tokio::test]
async fn test_delete_missing_folder() {
    let app = helpers::TestApp::new();
    let token = app.member("alice").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/folders/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.code(), "NOT_FOUND");
}
