//! Access token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use giftbox_core::config::AuthConfig;
use giftbox_core::error::AppError;

use super::claims::Claims;

/// Validates HS256 access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication("Invalid token"),
            })
    }
}

#[cfg(test)]
mod tests {
    use giftbox_core::error::ErrorKind;
    use giftbox_entity::user::UserRole;
    use uuid::Uuid;

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issued_token_decodes() {
        let config = config("test-secret");
        let user_id = Uuid::new_v4();
        let issued = JwtEncoder::new(&config)
            .issue_access_token(user_id, UserRole::Member, "ana")
            .expect("issue");

        let claims = JwtDecoder::new(&config)
            .decode_access_token(&issued.token)
            .expect("decode");
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.username, "ana");
        assert_eq!(claims.role, UserRole::Member);
        assert_eq!(claims.expires_at().timestamp(), issued.expires_at.timestamp());
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let issued = JwtEncoder::new(&config("one"))
            .issue_access_token(Uuid::new_v4(), UserRole::Admin, "root")
            .expect("issue");
        let err = JwtDecoder::new(&config("two"))
            .decode_access_token(&issued.token)
            .expect_err("wrong key");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = JwtDecoder::new(&config("one"))
            .decode_access_token("not.a.jwt")
            .expect_err("garbage");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}
