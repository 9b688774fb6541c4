//! Data models for the CoopFund backend

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

pub mod loan;
pub mod savings;
pub mod savings_payment;
pub mod settings;
pub mod share;
pub mod transaction;

pub use loan::*;
pub use savings::*;
pub use savings_payment::*;
pub use settings::*;
pub use share::*;
pub use transaction::*;

/// User roles
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Member,
}

/// User account status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Suspended,
    Inactive,
}

/// Member account
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct User {
    pub id: i64,
    pub member_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub full_name: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Suspend the account
    pub fn suspend(&mut self) {
        self.status = UserStatus::Suspended;
        self.updated_at = Utc::now();
    }

    /// Reinstate a suspended or inactive account
    pub fn activate(&mut self) {
        self.status = UserStatus::Active;
        self.updated_at = Utc::now();
    }
}

/// Fields required to insert a new user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub member_id: String,
    pub email: String,
    pub hashed_password: String,
    pub full_name: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
}

/// User response (sanitized for API)
#[derive(Debug, Serialize, Clone)]
pub struct UserResponse {
    pub id: i64,
    pub member_id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            member_id: user.member_id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}

/// Pagination parameters (skip/limit; no limit means all rows)
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct Page {
    #[serde(default)]
    pub skip: i64,
    pub limit: Option<i64>,
}

impl Page {
    pub fn new(skip: i64, limit: Option<i64>) -> Self {
        Self { skip, limit }
    }

    /// Everything, from the beginning
    pub fn all() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_status_transitions() {
        let mut user = User {
            id: 1,
            member_id: "CF-0002".to_string(),
            email: "member@example.com".to_string(),
            hashed_password: "hash".to_string(),
            full_name: "Test Member".to_string(),
            phone: String::new(),
            role: UserRole::Member,
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(user.is_active());
        assert!(!user.is_admin());

        user.suspend();
        assert_eq!(user.status, UserStatus::Suspended);
        assert!(!user.is_active());

        user.activate();
        assert_eq!(user.status, UserStatus::Active);
    }
}
