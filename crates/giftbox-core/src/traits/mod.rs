//! Core traits defined in `giftbox-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;
