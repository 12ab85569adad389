//! Role guards for admin-only routes.

use giftbox_core::error::AppError;

use crate::extractors::AuthUser;

/// Checks that the authenticated user has the admin role.
pub fn require_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.is_admin() {
        return Err(AppError::authorization("Admin access required"));
    }
    Ok(())
}
