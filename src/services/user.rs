//! Member account service

use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::auth::password::{hash_password, PasswordError};
use crate::error::ApiError;
use crate::models::{NewUser, Page, User, UserRole, UserStatus};
use crate::repository::{RepositoryError, UserRepository};

/// User service errors
#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Member ID already registered")]
    MemberIdTaken,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound => ApiError::NotFound(err.to_string()),
            UserError::EmailTaken | UserError::MemberIdTaken => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::Password(_) => ApiError::InternalError(err.to_string()),
            UserError::Repository(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Request to register a member (admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1))]
    pub member_id: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    pub role: UserRole,
}

/// Request to edit a member profile
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub member_id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

/// Member account management service
pub struct UserService<R> {
    users: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(users: R) -> Self {
        Self { users }
    }

    /// Register a member, rejecting a reused email or member id
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, UserError> {
        if self.users.get_by_email(&request.email).await?.is_some() {
            return Err(UserError::EmailTaken);
        }
        if self
            .users
            .get_by_member_id(&request.member_id)
            .await?
            .is_some()
        {
            return Err(UserError::MemberIdTaken);
        }

        let user = self
            .users
            .create(NewUser {
                member_id: request.member_id,
                email: request.email,
                hashed_password: hash_password(&request.password)?,
                full_name: request.full_name,
                phone: request.phone,
                role: request.role,
                status: UserStatus::Active,
            })
            .await?;

        tracing::info!(user_id = user.id, member_id = %user.member_id, "Member registered");

        Ok(user)
    }

    /// Edit profile fields, re-checking identity uniqueness on change
    pub async fn update(&self, user_id: i64, request: UpdateUserRequest) -> Result<User, UserError> {
        let mut user = self.get(user_id).await?;

        if let Some(email) = request.email {
            if email != user.email {
                if self.users.get_by_email(&email).await?.is_some() {
                    return Err(UserError::EmailTaken);
                }
                user.email = email;
            }
        }

        if let Some(member_id) = request.member_id {
            if member_id != user.member_id {
                if self.users.get_by_member_id(&member_id).await?.is_some() {
                    return Err(UserError::MemberIdTaken);
                }
                user.member_id = member_id;
            }
        }

        if let Some(full_name) = request.full_name {
            user.full_name = full_name;
        }
        if let Some(phone) = request.phone {
            user.phone = phone;
        }

        Ok(self.users.update(&user).await?)
    }

    pub async fn suspend(&self, user_id: i64) -> Result<User, UserError> {
        let mut user = self.get(user_id).await?;
        user.suspend();
        Ok(self.users.update(&user).await?)
    }

    pub async fn activate(&self, user_id: i64) -> Result<User, UserError> {
        let mut user = self.get(user_id).await?;
        user.activate();
        Ok(self.users.update(&user).await?)
    }

    pub async fn delete(&self, user_id: i64) -> Result<(), UserError> {
        if !self.users.delete(user_id).await? {
            return Err(UserError::NotFound);
        }
        Ok(())
    }

    pub async fn get(&self, user_id: i64) -> Result<User, UserError> {
        self.users.get_by_id(user_id).await?.ok_or(UserError::NotFound)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<User>, UserError> {
        Ok(self.users.list(page).await?)
    }

    pub async fn count(&self) -> Result<i64, UserError> {
        Ok(self.users.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryUserRepository;

    fn service() -> UserService<MemoryUserRepository> {
        UserService::new(MemoryUserRepository::new())
    }

    fn member(member_id: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            member_id: member_id.to_string(),
            email: email.to_string(),
            password: "initial-pass".to_string(),
            full_name: "Test Member".to_string(),
            phone: String::new(),
            role: UserRole::Member,
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let service = service();
        let user = service
            .create(member("CF-0002", "a@example.com"))
            .await
            .unwrap();
        assert_ne!(user.hashed_password, "initial-pass");
        assert_eq!(user.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service();
        service.create(member("CF-0002", "a@example.com")).await.unwrap();

        let result = service.create(member("CF-0003", "a@example.com")).await;
        assert!(matches!(result, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_duplicate_member_id_rejected() {
        let service = service();
        service.create(member("CF-0002", "a@example.com")).await.unwrap();

        let result = service.create(member("CF-0002", "b@example.com")).await;
        assert!(matches!(result, Err(UserError::MemberIdTaken)));
    }

    #[tokio::test]
    async fn test_update_checks_uniqueness_only_on_change() {
        let service = service();
        let user = service
            .create(member("CF-0002", "a@example.com"))
            .await
            .unwrap();
        service.create(member("CF-0003", "b@example.com")).await.unwrap();

        // Re-submitting the caller's own email is fine
        let updated = service
            .update(
                user.id,
                UpdateUserRequest {
                    member_id: None,
                    email: Some("a@example.com".to_string()),
                    full_name: Some("Renamed".to_string()),
                    phone: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name, "Renamed");

        // Taking another member's email is not
        let result = service
            .update(
                user.id,
                UpdateUserRequest {
                    member_id: None,
                    email: Some("b@example.com".to_string()),
                    full_name: None,
                    phone: None,
                },
            )
            .await;
        assert!(matches!(result, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_suspend_and_activate() {
        let service = service();
        let user = service
            .create(member("CF-0002", "a@example.com"))
            .await
            .unwrap();

        let user = service.suspend(user.id).await.unwrap();
        assert_eq!(user.status, UserStatus::Suspended);

        let user = service.activate(user.id).await.unwrap();
        assert_eq!(user.status, UserStatus::Active);
    }
}
