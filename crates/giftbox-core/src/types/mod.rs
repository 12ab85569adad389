//! Core type definitions used across the Giftbox workspace.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
