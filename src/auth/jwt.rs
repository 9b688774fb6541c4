//! JWT token generation and validation
//!
//! Handles creation and verification of bearer access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{User, UserRole};

/// JWT-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token decoding failed: {0}")]
    DecodingFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User role
    pub role: String,
    /// JWT ID
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Generate an access token for a user
///
/// # Arguments
/// * `user` - The authenticated user
/// * `secret` - JWT signing secret
/// * `ttl_minutes` - Token time-to-live in minutes
pub fn generate_access_token(
    user: &User,
    secret: &str,
    ttl_minutes: i64,
) -> Result<String, JwtError> {
    let now = Utc::now();
    let exp = now + Duration::minutes(ttl_minutes);

    let role = match user.role {
        UserRole::Admin => "admin",
        UserRole::Member => "member",
    };

    let claims = Claims {
        sub: user.id.to_string(),
        role: role.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Verify and decode a JWT token
///
/// # Returns
/// * `Ok(Claims)` if token is valid
/// * `Err(JwtError)` if validation fails
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            JwtError::TokenExpired
        } else {
            JwtError::DecodingFailed(e.to_string())
        }
    })?;

    Ok(token_data.claims)
}

/// Extract user ID from claims
pub fn get_user_id_from_claims(claims: &Claims) -> Result<i64, JwtError> {
    claims
        .sub
        .parse::<i64>()
        .map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;

    fn create_test_user() -> User {
        User {
            id: 42,
            member_id: "CF-0042".to_string(),
            email: "test@example.com".to_string(),
            hashed_password: "hash".to_string(),
            full_name: "Test Member".to_string(),
            phone: String::new(),
            role: UserRole::Member,
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_verify_token() {
        let user = create_test_user();
        let secret = "test-secret-key";

        let token = generate_access_token(&user, secret, 30).unwrap();
        assert!(!token.is_empty());

        let claims = verify_token(&token, secret).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "member");
        assert_eq!(get_user_id_from_claims(&claims).unwrap(), 42);
    }

    #[test]
    fn test_invalid_token() {
        let result = verify_token("invalid.token.here", "test-secret-key");
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let user = create_test_user();
        let token = generate_access_token(&user, "secret1", 30).unwrap();
        let result = verify_token(&token, "secret2");
        assert!(result.is_err());
    }
}
