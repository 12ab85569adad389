//! HTTP handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod folder;
pub mod health;
pub mod photo;
