//! Maps domain `AppError` to HTTP responses.
//!
//! The `IntoResponse for AppError` impl lives in `giftbox_core::http_error`
//! (orphan rule); its public items are re-exported here.

pub use giftbox_core::http_error::{ApiErrorResponse, status_for};
