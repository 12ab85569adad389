//! Convenience result type alias for Giftbox.

use crate::error::AppError;

/// A specialized `Result` type for Giftbox operations.
pub type AppResult<T> = Result<T, AppError>;
