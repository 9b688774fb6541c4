//! Authentication service
//!
//! Login by email or member id, password changes, and admin resets.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::error::ApiError;
use crate::models::{User, UserResponse};
use crate::repository::{RepositoryError, UserRepository};

use super::jwt::{generate_access_token, JwtError};
use super::password::{hash_password, verify_password, PasswordError};

/// Auth service errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Incorrect email/member ID or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Incorrect old password")]
    IncorrectOldPassword,

    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::InactiveUser => ApiError::BadRequest(err.to_string()),
            AuthError::IncorrectOldPassword => ApiError::BadRequest(err.to_string()),
            AuthError::UserNotFound => ApiError::NotFound(err.to_string()),
            AuthError::Token(_) | AuthError::Password(_) => ApiError::InternalError(err.to_string()),
            AuthError::Repository(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Login request: the identifier is an email or a member id
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Token response with a sanitized user summary
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

/// Request to change the caller's own password
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Authentication service over the user store
pub struct AuthService<R> {
    users: R,
    jwt_secret: String,
    access_token_ttl_minutes: i64,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(users: R, jwt_secret: String, access_token_ttl_minutes: i64) -> Self {
        Self {
            users,
            jwt_secret,
            access_token_ttl_minutes,
        }
    }

    /// Authenticate by email or member id and issue a bearer token
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse, AuthError> {
        // Try email first, then member id
        let user = match self.users.get_by_email(&request.identifier).await? {
            Some(user) => Some(user),
            None => self.users.get_by_member_id(&request.identifier).await?,
        };

        let user = match user {
            Some(user) if verify_password(&request.password, &user.hashed_password) => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        if !user.is_active() {
            return Err(AuthError::InactiveUser);
        }

        let access_token =
            generate_access_token(&user, &self.jwt_secret, self.access_token_ttl_minutes)?;

        tracing::info!(user_id = user.id, "User logged in");

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            user: user.into(),
        })
    }

    /// Change the caller's password after verifying the old one
    pub async fn change_password(
        &self,
        user_id: i64,
        request: ChangePasswordRequest,
    ) -> Result<(), AuthError> {
        let mut user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(&request.old_password, &user.hashed_password) {
            return Err(AuthError::IncorrectOldPassword);
        }

        user.hashed_password = hash_password(&request.new_password)?;
        self.users.update(&user).await?;

        Ok(())
    }

    /// Reset a member's password without knowing the old one (admin)
    pub async fn reset_password(&self, user_id: i64, new_password: &str) -> Result<User, AuthError> {
        let mut user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        user.hashed_password = hash_password(new_password)?;
        let user = self.users.update(&user).await?;

        Ok(user)
    }

    /// Get JWT secret (for middleware access)
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewUser, UserRole, UserStatus};
    use crate::repository::memory::MemoryUserRepository;

    async fn service_with_user(status: UserStatus) -> AuthService<MemoryUserRepository> {
        let users = MemoryUserRepository::new();
        users
            .create(NewUser {
                member_id: "CF-0007".to_string(),
                email: "member@example.com".to_string(),
                hashed_password: hash_password("correct-horse").unwrap(),
                full_name: "Test Member".to_string(),
                phone: String::new(),
                role: UserRole::Member,
                status,
            })
            .await
            .unwrap();
        AuthService::new(users, "test-secret".to_string(), 30)
    }

    #[tokio::test]
    async fn test_login_by_email() {
        let service = service_with_user(UserStatus::Active).await;
        let response = service
            .login(LoginRequest {
                identifier: "member@example.com".to_string(),
                password: "correct-horse".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.token_type, "bearer");
        assert!(!response.access_token.is_empty());
        assert_eq!(response.user.email, "member@example.com");
    }

    #[tokio::test]
    async fn test_login_by_member_id() {
        let service = service_with_user(UserStatus::Active).await;
        let response = service
            .login(LoginRequest {
                identifier: "CF-0007".to_string(),
                password: "correct-horse".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.user.member_id, "CF-0007");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = service_with_user(UserStatus::Active).await;
        let result = service
            .login(LoginRequest {
                identifier: "member@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_suspended_user() {
        let service = service_with_user(UserStatus::Suspended).await;
        let result = service
            .login(LoginRequest {
                identifier: "member@example.com".to_string(),
                password: "correct-horse".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InactiveUser)));
    }

    #[tokio::test]
    async fn test_change_password_requires_old_password() {
        let service = service_with_user(UserStatus::Active).await;

        let result = service
            .change_password(
                1,
                ChangePasswordRequest {
                    old_password: "wrong".to_string(),
                    new_password: "new-passphrase".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::IncorrectOldPassword)));

        service
            .change_password(
                1,
                ChangePasswordRequest {
                    old_password: "correct-horse".to_string(),
                    new_password: "new-passphrase".to_string(),
                },
            )
            .await
            .unwrap();

        // Old password no longer works
        let result = service
            .login(LoginRequest {
                identifier: "CF-0007".to_string(),
                password: "correct-horse".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
