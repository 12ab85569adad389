//! Request DTOs with validation.
//!
//! Unknown fields are rejected so typos surface as validation errors
//! instead of being silently ignored.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    /// Login name.
    #[validate(length(min = 3, max = 64, message = "Username must be 3 to 64 characters"))]
    pub username: String,
    /// Contact email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
    /// Optional secret protecting the folder.
    #[validate(length(min = 1, message = "Secret cannot be empty"))]
    pub secret: Option<String>,
}

/// Rename folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RenameFolderRequest {
    /// New name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1 to 255 characters"))]
    pub name: String,
}

/// Set, change or clear a folder secret. `new_secret: null` clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SetSecretRequest {
    /// Current secret; required when the folder is protected.
    pub current_secret: Option<String>,
    /// Replacement secret.
    #[validate(length(min = 1, message = "Secret cannot be empty"))]
    pub new_secret: Option<String>,
}

/// Folder secret verification body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VerifySecretRequest {
    /// Secret to check.
    #[validate(length(min = 1, message = "Secret is required"))]
    pub secret: String,
}

/// Optional body of `DELETE /folders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DeleteFolderRequest {
    /// Secret of a protected folder.
    pub secret: Option<String>,
}
