//! # giftbox-core
//!
//! Core crate for Giftbox. Contains configuration schemas, the unified
//! error system, pagination types, and the blob storage trait.
//!
//! This crate has **no** internal dependencies on other Giftbox crates.

pub mod config;
pub mod error;
pub mod http_error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
