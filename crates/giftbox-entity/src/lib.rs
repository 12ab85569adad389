//! # giftbox-entity
//!
//! Domain entity models for Giftbox. Every struct in this crate
//! represents a database table row or a domain value object. Row
//! entities derive `sqlx::FromRow`.

pub mod folder;
pub mod photo;
pub mod user;
