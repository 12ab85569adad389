//! # giftbox-api
//!
//! HTTP API layer for Giftbox built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging),
//! extractors, DTOs, and the mapping from `AppError` to the failure
//! envelope.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, initialize};
pub use state::AppState;
