//! Access state of a folder.

use serde::{Deserialize, Serialize};

/// Whether a folder is gated by a secret.
///
/// For the owner a protected folder is still readable by identity;
/// deletion and secret changes additionally require the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderAccess {
    /// No secret stored.
    Unprotected,
    /// A secret hash is stored.
    Protected,
}

impl FolderAccess {
    /// Derive the access state from the stored secret hash.
    pub fn from_secret_hash(secret_hash: Option<&str>) -> Self {
        match secret_hash {
            Some(_) => Self::Protected,
            None => Self::Unprotected,
        }
    }

    /// Whether sensitive operations must present the secret.
    pub fn requires_secret(&self) -> bool {
        matches!(self, Self::Protected)
    }
}
