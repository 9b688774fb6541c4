//! In-memory repository implementations
//!
//! Backing stores for the service test-suites; behavior mirrors the
//! Postgres implementations without needing a database.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::models::{
    Loan, LoanStatus, NewLoan, NewSavings, NewSavingsPayment, NewShare, NewTransaction, NewUser,
    Page, Savings, SavingsPayment, Share, SystemSetting, Transaction, TransactionType, User,
};

use super::{
    LoanRepository, RepoResult, SavingsPaymentRepository, SavingsRepository, SettingsRepository,
    ShareRepository, TransactionRepository, UserRepository,
};

fn paginate<T: Clone>(rows: &[T], page: Page) -> Vec<T> {
    let iter = rows.iter().skip(page.skip.max(0) as usize);
    match page.limit {
        Some(limit) => iter.take(limit.max(0) as usize).cloned().collect(),
        None => iter.cloned().collect(),
    }
}

/// In-memory user store
#[derive(Default)]
pub struct MemoryUserRepository {
    rows: Mutex<Vec<User>>,
    next_id: Mutex<i64>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let now = Utc::now();
        let user = User {
            id: self.alloc_id(),
            member_id: user.member_id,
            email: user.email,
            hashed_password: user.hashed_password,
            full_name: user.full_name,
            phone: user.phone,
            role: user.role,
            status: user.status,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get_by_member_id(&self, member_id: &str) -> RepoResult<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.member_id == member_id)
            .cloned())
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<User>> {
        Ok(paginate(&self.rows.lock().unwrap(), page))
    }

    async fn update(&self, user: &User) -> RepoResult<User> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
            return Ok(user.clone());
        }
        Err(sqlx::Error::RowNotFound.into())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() < before)
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

/// In-memory loan store
#[derive(Default)]
pub struct MemoryLoanRepository {
    rows: Mutex<Vec<Loan>>,
    next_id: Mutex<i64>,
}

impl MemoryLoanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }
}

#[async_trait]
impl LoanRepository for MemoryLoanRepository {
    async fn create(&self, loan: NewLoan) -> RepoResult<Loan> {
        let now = Utc::now();
        let loan = Loan {
            id: self.alloc_id(),
            user_id: loan.user_id,
            loan_amount: loan.loan_amount,
            interest_rate: loan.interest_rate,
            duration_months: loan.duration_months,
            monthly_repayment: loan.monthly_repayment,
            total_repayable: loan.total_repayable,
            amount_paid: Decimal::ZERO,
            balance: loan.balance,
            status: loan.status,
            application_date: now,
            approval_date: None,
            disbursement_date: None,
            description: loan.description,
            financial_year: loan.financial_year,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(loan.clone());
        Ok(loan)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Loan>> {
        Ok(self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Loan>> {
        let rows: Vec<Loan> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn list_by_status(&self, status: LoanStatus, page: Page) -> RepoResult<Vec<Loan>> {
        let rows: Vec<Loan> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.status == status)
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Loan>> {
        Ok(paginate(&self.rows.lock().unwrap(), page))
    }

    async fn update(&self, loan: &Loan) -> RepoResult<Loan> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|l| l.id == loan.id) {
            *existing = loan.clone();
            return Ok(loan.clone());
        }
        Err(sqlx::Error::RowNotFound.into())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|l| l.id != id);
        Ok(rows.len() < before)
    }

    async fn active_loans_for_user(&self, user_id: i64) -> RepoResult<Vec<Loan>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id && l.status == LoanStatus::Active)
            .cloned()
            .collect())
    }

    async fn total_disbursed(&self) -> RepoResult<Decimal> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| matches!(l.status, LoanStatus::Active | LoanStatus::Closed))
            .map(|l| l.loan_amount)
            .sum())
    }

    async fn total_outstanding(&self) -> RepoResult<Decimal> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.status == LoanStatus::Active)
            .map(|l| l.balance)
            .sum())
    }
}

/// In-memory savings store
#[derive(Default)]
pub struct MemorySavingsRepository {
    rows: Mutex<Vec<Savings>>,
    next_id: Mutex<i64>,
}

impl MemorySavingsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }
}

#[async_trait]
impl SavingsRepository for MemorySavingsRepository {
    async fn create(&self, savings: NewSavings) -> RepoResult<Savings> {
        let now = Utc::now();
        let savings = Savings {
            id: self.alloc_id(),
            user_id: savings.user_id,
            month: savings.month,
            year: savings.year,
            expected_amount: savings.expected_amount,
            paid_amount: savings.paid_amount,
            status: savings.status,
            payment_date: None,
            financial_year: savings.financial_year,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(savings.clone());
        Ok(savings)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Savings>> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn get_by_user_and_period(
        &self,
        user_id: i64,
        month: &str,
        year: i32,
    ) -> RepoResult<Option<Savings>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.user_id == user_id && s.month == month && s.year == year)
            .cloned())
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Savings>> {
        let rows: Vec<Savings> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Savings>> {
        Ok(paginate(&self.rows.lock().unwrap(), page))
    }

    async fn update(&self, savings: &Savings) -> RepoResult<Savings> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|s| s.id == savings.id) {
            *existing = savings.clone();
            return Ok(savings.clone());
        }
        Err(sqlx::Error::RowNotFound.into())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }

    async fn total_paid_by_user(&self, user_id: i64) -> RepoResult<Decimal> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.paid_amount)
            .sum())
    }

    async fn total_paid_all(&self) -> RepoResult<Decimal> {
        Ok(self.rows.lock().unwrap().iter().map(|s| s.paid_amount).sum())
    }

    async fn total_expected_by_user(&self, user_id: i64) -> RepoResult<Decimal> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.expected_amount)
            .sum())
    }
}

/// In-memory payment ledger store
#[derive(Default)]
pub struct MemorySavingsPaymentRepository {
    rows: Mutex<Vec<SavingsPayment>>,
    next_id: Mutex<i64>,
}

impl MemorySavingsPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }
}

#[async_trait]
impl SavingsPaymentRepository for MemorySavingsPaymentRepository {
    async fn create(&self, payment: NewSavingsPayment) -> RepoResult<SavingsPayment> {
        let payment = SavingsPayment {
            id: self.alloc_id(),
            user_id: payment.user_id,
            amount: payment.amount,
            kind: payment.kind,
            payment_date: payment.payment_date,
            payment_month: payment.payment_month,
            description: payment.description,
            financial_year: payment.financial_year,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(payment.clone());
        Ok(payment)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<SavingsPayment>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<SavingsPayment>> {
        Ok(paginate(&self.rows.lock().unwrap(), page))
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<SavingsPayment>> {
        let rows: Vec<SavingsPayment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn update(&self, payment: &SavingsPayment) -> RepoResult<SavingsPayment> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|p| p.id == payment.id) {
            *existing = payment.clone();
            return Ok(payment.clone());
        }
        Err(sqlx::Error::RowNotFound.into())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }

    async fn total_paid_by_user(&self, user_id: i64) -> RepoResult<Decimal> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.amount)
            .sum())
    }

    async fn count_by_user(&self, user_id: i64) -> RepoResult<i64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .count() as i64)
    }
}

/// In-memory share store
#[derive(Default)]
pub struct MemoryShareRepository {
    rows: Mutex<Vec<Share>>,
    next_id: Mutex<i64>,
}

impl MemoryShareRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }
}

#[async_trait]
impl ShareRepository for MemoryShareRepository {
    async fn create(&self, share: NewShare) -> RepoResult<Share> {
        let now = Utc::now();
        let share = Share {
            id: self.alloc_id(),
            user_id: share.user_id,
            shares_count: share.shares_count,
            share_value: share.share_value,
            total_value: share.total_value,
            purchase_date: share.purchase_date,
            financial_year: share.financial_year,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(share.clone());
        Ok(share)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Share>> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Share>> {
        let rows: Vec<Share> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Share>> {
        Ok(paginate(&self.rows.lock().unwrap(), page))
    }

    async fn update(&self, share: &Share) -> RepoResult<Share> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|s| s.id == share.id) {
            *existing = share.clone();
            return Ok(share.clone());
        }
        Err(sqlx::Error::RowNotFound.into())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }

    async fn total_shares_by_user(&self, user_id: i64) -> RepoResult<i64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.shares_count as i64)
            .sum())
    }

    async fn total_value_by_user(&self, user_id: i64) -> RepoResult<Decimal> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.total_value)
            .sum())
    }

    async fn total_value_all(&self) -> RepoResult<Decimal> {
        Ok(self.rows.lock().unwrap().iter().map(|s| s.total_value).sum())
    }
}

/// In-memory transaction store
#[derive(Default)]
pub struct MemoryTransactionRepository {
    rows: Mutex<Vec<Transaction>>,
    next_id: Mutex<i64>,
}

impl MemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }
}

#[async_trait]
impl TransactionRepository for MemoryTransactionRepository {
    async fn create(&self, transaction: NewTransaction) -> RepoResult<Transaction> {
        let transaction = Transaction {
            id: self.alloc_id(),
            user_id: transaction.user_id,
            transaction_type: transaction.transaction_type,
            description: transaction.description,
            debit: transaction.debit,
            credit: transaction.credit,
            balance: Decimal::ZERO,
            reference_id: transaction.reference_id,
            transaction_date: transaction.transaction_date,
            financial_year: transaction.financial_year,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(transaction.clone());
        Ok(transaction)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Transaction>> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Transaction>> {
        let rows: Vec<Transaction> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn list_by_type(
        &self,
        transaction_type: TransactionType,
        page: Page,
    ) -> RepoResult<Vec<Transaction>> {
        let rows: Vec<Transaction> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
            .cloned()
            .collect();
        Ok(paginate(&rows, page))
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Transaction>> {
        Ok(paginate(&self.rows.lock().unwrap(), page))
    }

    async fn update(&self, transaction: &Transaction) -> RepoResult<Transaction> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|t| t.id == transaction.id) {
            *existing = transaction.clone();
            return Ok(transaction.clone());
        }
        Err(sqlx::Error::RowNotFound.into())
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }
}

/// In-memory settings store
#[derive(Default)]
pub struct MemorySettingsRepository {
    rows: Mutex<Vec<SystemSetting>>,
    next_id: Mutex<i64>,
}

impl MemorySettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for MemorySettingsRepository {
    async fn get_by_key(&self, key: &str) -> RepoResult<Option<SystemSetting>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.key == key)
            .cloned())
    }

    async fn upsert(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
    ) -> RepoResult<SystemSetting> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|s| s.key == key) {
            existing.value = value.to_string();
            if let Some(description) = description {
                existing.description = Some(description.to_string());
            }
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let setting = SystemSetting {
            id,
            key: key.to_string(),
            value: value.to_string(),
            description: description.map(|d| d.to_string()),
            updated_at: Utc::now(),
        };
        rows.push(setting.clone());
        Ok(setting)
    }

    async fn list(&self) -> RepoResult<Vec<SystemSetting>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(rows)
    }
}
