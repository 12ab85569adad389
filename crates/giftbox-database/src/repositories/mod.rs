//! PostgreSQL implementations of the store traits.

pub mod folder;
pub mod photo;
pub mod user;

pub use folder::FolderRepository;
pub use photo::PhotoRepository;
pub use user::UserRepository;
