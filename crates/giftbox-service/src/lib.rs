//! # giftbox-service
//!
//! Business logic for Giftbox. Each service orchestrates the stores,
//! blob storage and credential checks behind one use case.
//!
//! Services follow constructor injection: every dependency arrives as an
//! `Arc` at construction time.

pub mod context;
pub mod folder;
pub mod photo;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use folder::{FolderDeletion, FolderService};
pub use photo::PhotoService;
pub use user::UserService;
