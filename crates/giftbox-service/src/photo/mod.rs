//! Photo upload, listing and removal.

pub mod service;

pub use service::{PhotoContent, PhotoService, UploadPhotoRequest};
