//! Protected folder management.

pub mod service;

pub use service::{
    CreateFolderRequest, FolderDeletion, FolderDetails, FolderService, StorageCleanupFailure,
};
