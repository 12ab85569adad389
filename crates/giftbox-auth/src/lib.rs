//! # giftbox-auth
//!
//! Credential and identity primitives for Giftbox.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing for account passwords and folder secrets, account password policy
//! - `jwt`: access token issuance and validation
//! - `ownership`: the owner-only check applied to folders and photos

pub mod jwt;
pub mod ownership;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use ownership::{Owned, OwnershipGuard};
pub use password::{PasswordHasher, PasswordValidator};
