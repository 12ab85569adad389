//! Account registration, login, and profile lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use giftbox_auth::jwt::JwtEncoder;
use giftbox_auth::password::{PasswordHasher, PasswordValidator};
use giftbox_core::config::{AuthConfig, BootstrapAdminConfig};
use giftbox_core::error::AppError;
use giftbox_core::result::AppResult;
use giftbox_core::types::pagination::{PageRequest, PageResponse};
use giftbox_database::store::UserStore;
use giftbox_entity::user::{CreateUser, User, UserRole};

use crate::context::RequestContext;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Handles accounts and sign-in.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    encoder: JwtEncoder,
}

/// Data for a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Unique login name.
    pub username: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Plaintext password, checked against the policy then hashed.
    pub password: String,
}

/// Credentials for signing in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: User,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Self {
        Self {
            users,
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(config),
            encoder: JwtEncoder::new(config),
        }
    }

    /// Registers a member account.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<User> {
        validate_username(&req.username)?;
        if let Some(email) = req.email.as_deref() {
            if !email.contains('@') {
                return Err(AppError::validation("Invalid email format"));
            }
        }
        self.validator.validate(&req.password)?;

        if self.users.find_by_username(&req.username).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                req.username
            )));
        }

        let password_hash = self.hasher.hash(&req.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: req.username,
                email: req.email,
                password_hash,
                role: UserRole::Member,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Creates the configured admin account unless its username is
    /// already registered. Returns whether an account was created.
    pub async fn ensure_admin(&self, admin: &BootstrapAdminConfig) -> AppResult<bool> {
        validate_username(&admin.username)?;
        if self.users.find_by_username(&admin.username).await?.is_some() {
            return Ok(false);
        }
        self.validator.validate(&admin.password)?;

        let user = self
            .users
            .create(&CreateUser {
                username: admin.username.clone(),
                email: None,
                password_hash: self.hasher.hash(&admin.password)?,
                role: UserRole::Admin,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "Bootstrap admin created");
        Ok(true)
    }

    /// Verifies credentials and issues an access token. Unknown users and
    /// wrong passwords fail identically.
    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthSession> {
        let Some(user) = self.users.find_by_username(&req.username).await? else {
            warn!(username = %req.username, "Login attempt for unknown user");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(&req.password, &user.password_hash) {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let issued = self
            .encoder
            .issue_access_token(user.id, user.role, &user.username)?;
        self.users.record_login(user.id).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthSession {
            access_token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// The caller's own account.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Lists every account. Admin only.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        if !ctx.is_admin() {
            return Err(AppError::authorization("Admin access required"));
        }
        self.users.list(&page).await
    }
}

fn validate_username(username: &str) -> AppResult<()> {
    let length = username.chars().count();
    if !(3..=64).contains(&length) {
        return Err(AppError::validation(
            "Username must be between 3 and 64 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        return Err(AppError::validation(
            "Username may only contain letters, digits, '_', '.' and '-'",
        ));
    }
    Ok(())
}
