//! Folder domain entities.

pub mod access;
pub mod model;

pub use access::FolderAccess;
pub use model::{CreateFolder, Folder};
