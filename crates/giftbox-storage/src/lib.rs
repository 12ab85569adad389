//! # giftbox-storage
//!
//! Blob storage for photo content. The provider in use is picked at
//! startup from `storage.provider` by [`manager::create_provider`].

pub mod manager;
pub mod providers;

pub use manager::create_provider;
pub use providers::{LocalStorageProvider, MemoryStorageProvider};
