//! Shared test helpers for integration tests.
//!
//! Every `TestApp` runs the full router over the in-memory stores and blob
//! provider, so no database is needed.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use giftbox_api::{AppState, build_app, build_state};
use giftbox_core::config::{AppConfig, BootstrapAdminConfig};
use giftbox_database::Stores;
use giftbox_storage::MemoryStorageProvider;

/// Password that satisfies the strength policy.
pub const STRONG_PASSWORD: &str = "violet-harbor-lantern-42";

/// Upload limit used by the test config.
pub const MAX_UPLOAD_BYTES: u64 = 4096;

const MULTIPART_BOUNDARY: &str = "giftbox-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for direct service calls
    pub state: AppState,
    /// The blob provider behind the router
    pub blobs: MemoryStorageProvider,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = "memory".to_string();
        config.storage.provider = "memory".to_string();
        config.storage.max_upload_size_bytes = MAX_UPLOAD_BYTES;
        config.auth.jwt_secret = "integration-test-signing-key".to_string();

        let blobs = MemoryStorageProvider::new();
        let state = build_state(config, Stores::memory(), Arc::new(blobs.clone()));
        let router = build_app(state.clone());

        Self {
            router,
            state,
            blobs,
        }
    }

    /// Register a member and return their ID
    pub async fn register(&self, username: &str) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": STRONG_PASSWORD,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Login and return JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Register a member and return their access token
    pub async fn member(&self, username: &str) -> String {
        self.register(username).await;
        self.login(username, STRONG_PASSWORD).await
    }

    /// Create an admin account and return its access token
    pub async fn admin(&self, username: &str) -> String {
        self.state
            .user_service
            .ensure_admin(&BootstrapAdminConfig {
                username: username.to_string(),
                password: STRONG_PASSWORD.to_string(),
            })
            .await
            .expect("Failed to create admin");
        self.login(username, STRONG_PASSWORD).await
    }

    /// Create a folder and return its ID
    pub async fn create_folder(&self, token: &str, name: &str, secret: Option<&str>) -> Uuid {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "secret": secret })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Folder creation failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let raw = self.send(req).await;
        TestResponse::from_raw(raw)
    }

    /// Upload a photo through the multipart endpoint
    pub async fn upload_photo(
        &self,
        token: &str,
        folder_id: Option<Uuid>,
        file_name: &str,
        mime_type: &str,
        data: &[u8],
    ) -> TestResponse {
        let folder_id = folder_id.map(|id| id.to_string());
        let mut fields = vec![("caption", "from the tests")];
        if let Some(folder_id) = folder_id.as_deref() {
            fields.insert(0, ("folder_id", folder_id));
        }
        self.post_form(token, &fields, Some((file_name, mime_type, data)))
            .await
    }

    /// POST a multipart form to the photo endpoint
    pub async fn post_form(
        &self,
        token: &str,
        text_fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in text_fields {
            push_text_field(&mut body, name, value);
        }
        if let Some((file_name, mime_type, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
                     filename=\"{file_name}\"\r\nContent-Type: {mime_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/photos")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        TestResponse::from_raw(self.send(req).await)
    }

    /// GET a path and return the undecoded response
    pub async fn get_raw(&self, path: &str, token: &str) -> RawResponse {
        let req = Request::builder()
            .method("GET")
            .uri(path)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            body,
        }
    }
}

fn push_text_field(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n\
             {value}\r\n"
        )
        .as_bytes(),
    );
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    fn from_raw(raw: RawResponse) -> Self {
        let body: Value = serde_json::from_slice(&raw.body).unwrap_or(Value::Null);
        Self {
            status: raw.status,
            body,
        }
    }

    /// `data.id` of a success envelope
    pub fn id(&self) -> Uuid {
        self.body["data"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .expect("No data.id in response")
    }

    /// `code` of a failure envelope
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}

/// Undecoded response
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}
