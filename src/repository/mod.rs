//! Persistence contracts consumed by the domain services
//!
//! One trait per entity; the Postgres implementations live in
//! [`postgres`], and [`memory`] provides in-memory doubles for the
//! service test-suites.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    Loan, LoanStatus, NewLoan, NewSavings, NewSavingsPayment, NewShare, NewTransaction, NewUser,
    Page, Savings, SavingsPayment, Share, SystemSetting, Transaction, TransactionType, User,
};

pub mod memory;
pub mod postgres;

/// Errors surfaced by a backing store
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Persistence contract for member accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> RepoResult<User>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Option<User>>;
    async fn get_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    async fn get_by_member_id(&self, member_id: &str) -> RepoResult<Option<User>>;
    async fn list(&self, page: Page) -> RepoResult<Vec<User>>;
    async fn update(&self, user: &User) -> RepoResult<User>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    async fn count(&self) -> RepoResult<i64>;
}

/// Persistence contract for loans
#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn create(&self, loan: NewLoan) -> RepoResult<Loan>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Loan>>;
    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Loan>>;
    async fn list_by_status(&self, status: LoanStatus, page: Page) -> RepoResult<Vec<Loan>>;
    async fn list(&self, page: Page) -> RepoResult<Vec<Loan>>;
    async fn update(&self, loan: &Loan) -> RepoResult<Loan>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    /// Active loans for a member (multiple concurrent loans are permitted)
    async fn active_loans_for_user(&self, user_id: i64) -> RepoResult<Vec<Loan>>;
    /// Sum of principal for loans that reached disbursement (active or closed)
    async fn total_disbursed(&self) -> RepoResult<Decimal>;
    /// Sum of outstanding balances on active loans
    async fn total_outstanding(&self) -> RepoResult<Decimal>;
}

/// Persistence contract for period-based savings
#[async_trait]
pub trait SavingsRepository: Send + Sync {
    async fn create(&self, savings: NewSavings) -> RepoResult<Savings>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Savings>>;
    async fn get_by_user_and_period(
        &self,
        user_id: i64,
        month: &str,
        year: i32,
    ) -> RepoResult<Option<Savings>>;
    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Savings>>;
    async fn list(&self, page: Page) -> RepoResult<Vec<Savings>>;
    async fn update(&self, savings: &Savings) -> RepoResult<Savings>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    async fn total_paid_by_user(&self, user_id: i64) -> RepoResult<Decimal>;
    async fn total_paid_all(&self) -> RepoResult<Decimal>;
    async fn total_expected_by_user(&self, user_id: i64) -> RepoResult<Decimal>;
}

/// Persistence contract for the payment ledger
#[async_trait]
pub trait SavingsPaymentRepository: Send + Sync {
    async fn create(&self, payment: NewSavingsPayment) -> RepoResult<SavingsPayment>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Option<SavingsPayment>>;
    async fn list(&self, page: Page) -> RepoResult<Vec<SavingsPayment>>;
    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<SavingsPayment>>;
    async fn update(&self, payment: &SavingsPayment) -> RepoResult<SavingsPayment>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    async fn total_paid_by_user(&self, user_id: i64) -> RepoResult<Decimal>;
    async fn count_by_user(&self, user_id: i64) -> RepoResult<i64>;
}

/// Persistence contract for share holdings
#[async_trait]
pub trait ShareRepository: Send + Sync {
    async fn create(&self, share: NewShare) -> RepoResult<Share>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Share>>;
    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Share>>;
    async fn list(&self, page: Page) -> RepoResult<Vec<Share>>;
    async fn update(&self, share: &Share) -> RepoResult<Share>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
    async fn total_shares_by_user(&self, user_id: i64) -> RepoResult<i64>;
    async fn total_value_by_user(&self, user_id: i64) -> RepoResult<Decimal>;
    async fn total_value_all(&self) -> RepoResult<Decimal>;
}

/// Persistence contract for ledger transactions
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn create(&self, transaction: NewTransaction) -> RepoResult<Transaction>;
    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Transaction>>;
    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Transaction>>;
    async fn list_by_type(
        &self,
        transaction_type: TransactionType,
        page: Page,
    ) -> RepoResult<Vec<Transaction>>;
    async fn list(&self, page: Page) -> RepoResult<Vec<Transaction>>;
    async fn update(&self, transaction: &Transaction) -> RepoResult<Transaction>;
    async fn delete(&self, id: i64) -> RepoResult<bool>;
}

/// Persistence contract for the settings store
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_by_key(&self, key: &str) -> RepoResult<Option<SystemSetting>>;
    async fn upsert(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
    ) -> RepoResult<SystemSetting>;
    async fn list(&self) -> RepoResult<Vec<SystemSetting>>;
}
