//! PostgreSQL implementations of the repository traits

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::{
    Loan, LoanStatus, NewLoan, NewSavings, NewSavingsPayment, NewShare, NewTransaction, NewUser,
    Page, Savings, SavingsPayment, Share, SystemSetting, Transaction, TransactionType, User,
};

use super::{
    LoanRepository, RepoResult, SavingsPaymentRepository, SavingsRepository, SettingsRepository,
    ShareRepository, TransactionRepository, UserRepository,
};

/// Member account store backed by the `users` table
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (member_id, email, hashed_password, full_name, phone, role, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&user.member_id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.full_name)
        .bind(&user.phone)
        .bind(user.role)
        .bind(user.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_by_member_id(&self, member_id: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE member_id = $1")
            .bind(member_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn update(&self, user: &User) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET member_id = $1, email = $2, hashed_password = $3, full_name = $4,
                phone = $5, role = $6, status = $7, updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&user.member_id)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .bind(&user.full_name)
        .bind(&user.phone)
        .bind(user.role)
        .bind(user.status)
        .bind(user.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn count(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// Loan store backed by the `loans` table
#[derive(Clone)]
pub struct PgLoanRepository {
    pool: PgPool,
}

impl PgLoanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanRepository for PgLoanRepository {
    async fn create(&self, loan: NewLoan) -> RepoResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (
                user_id, loan_amount, interest_rate, duration_months,
                monthly_repayment, total_repayable, balance, status,
                description, financial_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(loan.user_id)
        .bind(loan.loan_amount)
        .bind(loan.interest_rate)
        .bind(loan.duration_months)
        .bind(loan.monthly_repayment)
        .bind(loan.total_repayable)
        .bind(loan.balance)
        .bind(loan.status)
        .bind(&loan.description)
        .bind(&loan.financial_year)
        .fetch_one(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(loan)
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    async fn list_by_status(&self, status: LoanStatus, page: Page) -> RepoResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE status = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    async fn update(&self, loan: &Loan) -> RepoResult<Loan> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET loan_amount = $1, interest_rate = $2, duration_months = $3,
                monthly_repayment = $4, total_repayable = $5, amount_paid = $6,
                balance = $7, status = $8, approval_date = $9,
                disbursement_date = $10, description = $11, financial_year = $12,
                updated_at = NOW()
            WHERE id = $13
            RETURNING *
            "#,
        )
        .bind(loan.loan_amount)
        .bind(loan.interest_rate)
        .bind(loan.duration_months)
        .bind(loan.monthly_repayment)
        .bind(loan.total_repayable)
        .bind(loan.amount_paid)
        .bind(loan.balance)
        .bind(loan.status)
        .bind(loan.approval_date)
        .bind(loan.disbursement_date)
        .bind(&loan.description)
        .bind(&loan.financial_year)
        .bind(loan.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(loan)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn active_loans_for_user(&self, user_id: i64) -> RepoResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE user_id = $1 AND status = 'active'",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    async fn total_disbursed(&self) -> RepoResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(loan_amount), 0) FROM loans WHERE status IN ('active', 'closed')",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn total_outstanding(&self) -> RepoResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(balance), 0) FROM loans WHERE status = 'active'",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}

/// Savings store backed by the `savings` table
#[derive(Clone)]
pub struct PgSavingsRepository {
    pool: PgPool,
}

impl PgSavingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavingsRepository for PgSavingsRepository {
    async fn create(&self, savings: NewSavings) -> RepoResult<Savings> {
        let savings = sqlx::query_as::<_, Savings>(
            r#"
            INSERT INTO savings (
                user_id, month, year, expected_amount, paid_amount, status, financial_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(savings.user_id)
        .bind(&savings.month)
        .bind(savings.year)
        .bind(savings.expected_amount)
        .bind(savings.paid_amount)
        .bind(savings.status)
        .bind(&savings.financial_year)
        .fetch_one(&self.pool)
        .await?;

        Ok(savings)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Savings>> {
        let savings = sqlx::query_as::<_, Savings>("SELECT * FROM savings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(savings)
    }

    async fn get_by_user_and_period(
        &self,
        user_id: i64,
        month: &str,
        year: i32,
    ) -> RepoResult<Option<Savings>> {
        let savings = sqlx::query_as::<_, Savings>(
            "SELECT * FROM savings WHERE user_id = $1 AND month = $2 AND year = $3",
        )
        .bind(user_id)
        .bind(month)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;
        Ok(savings)
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Savings>> {
        let rows = sqlx::query_as::<_, Savings>(
            "SELECT * FROM savings WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Savings>> {
        let rows = sqlx::query_as::<_, Savings>(
            "SELECT * FROM savings ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, savings: &Savings) -> RepoResult<Savings> {
        let savings = sqlx::query_as::<_, Savings>(
            r#"
            UPDATE savings
            SET expected_amount = $1, paid_amount = $2, status = $3,
                payment_date = $4, financial_year = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(savings.expected_amount)
        .bind(savings.paid_amount)
        .bind(savings.status)
        .bind(savings.payment_date)
        .bind(&savings.financial_year)
        .bind(savings.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(savings)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM savings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn total_paid_by_user(&self, user_id: i64) -> RepoResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(paid_amount), 0) FROM savings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn total_paid_all(&self) -> RepoResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(paid_amount), 0) FROM savings",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn total_expected_by_user(&self, user_id: i64) -> RepoResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(expected_amount), 0) FROM savings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}

/// Payment ledger store backed by the `savings_payments` table
#[derive(Clone)]
pub struct PgSavingsPaymentRepository {
    pool: PgPool,
}

impl PgSavingsPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavingsPaymentRepository for PgSavingsPaymentRepository {
    async fn create(&self, payment: NewSavingsPayment) -> RepoResult<SavingsPayment> {
        let payment = sqlx::query_as::<_, SavingsPayment>(
            r#"
            INSERT INTO savings_payments (
                user_id, amount, kind, payment_date, payment_month, description, financial_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payment.user_id)
        .bind(payment.amount)
        .bind(payment.kind)
        .bind(payment.payment_date)
        .bind(&payment.payment_month)
        .bind(&payment.description)
        .bind(&payment.financial_year)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<SavingsPayment>> {
        let payment =
            sqlx::query_as::<_, SavingsPayment>("SELECT * FROM savings_payments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(payment)
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<SavingsPayment>> {
        let rows = sqlx::query_as::<_, SavingsPayment>(
            "SELECT * FROM savings_payments ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<SavingsPayment>> {
        let rows = sqlx::query_as::<_, SavingsPayment>(
            "SELECT * FROM savings_payments WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, payment: &SavingsPayment) -> RepoResult<SavingsPayment> {
        let payment = sqlx::query_as::<_, SavingsPayment>(
            r#"
            UPDATE savings_payments
            SET user_id = $1, amount = $2, kind = $3, payment_date = $4,
                payment_month = $5, description = $6, financial_year = $7
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(payment.user_id)
        .bind(payment.amount)
        .bind(payment.kind)
        .bind(payment.payment_date)
        .bind(&payment.payment_month)
        .bind(&payment.description)
        .bind(&payment.financial_year)
        .bind(payment.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(payment)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM savings_payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn total_paid_by_user(&self, user_id: i64) -> RepoResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(amount), 0) FROM savings_payments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn count_by_user(&self, user_id: i64) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM savings_payments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

/// Share store backed by the `shares` table
#[derive(Clone)]
pub struct PgShareRepository {
    pool: PgPool,
}

impl PgShareRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareRepository for PgShareRepository {
    async fn create(&self, share: NewShare) -> RepoResult<Share> {
        let share = sqlx::query_as::<_, Share>(
            r#"
            INSERT INTO shares (
                user_id, shares_count, share_value, total_value, purchase_date, financial_year
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(share.user_id)
        .bind(share.shares_count)
        .bind(share.share_value)
        .bind(share.total_value)
        .bind(share.purchase_date)
        .bind(&share.financial_year)
        .fetch_one(&self.pool)
        .await?;

        Ok(share)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Share>> {
        let share = sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(share)
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Share>> {
        let rows = sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Share>> {
        let rows = sqlx::query_as::<_, Share>(
            "SELECT * FROM shares ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, share: &Share) -> RepoResult<Share> {
        let share = sqlx::query_as::<_, Share>(
            r#"
            UPDATE shares
            SET shares_count = $1, share_value = $2, total_value = $3,
                financial_year = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(share.shares_count)
        .bind(share.share_value)
        .bind(share.total_value)
        .bind(&share.financial_year)
        .bind(share.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(share)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn total_shares_by_user(&self, user_id: i64) -> RepoResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(shares_count), 0) FROM shares WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn total_value_by_user(&self, user_id: i64) -> RepoResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total_value), 0) FROM shares WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn total_value_all(&self) -> RepoResult<Decimal> {
        let total = sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total_value), 0) FROM shares",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}

/// Transaction store backed by the `transactions` table
#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn create(&self, transaction: NewTransaction) -> RepoResult<Transaction> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                user_id, transaction_type, description, debit, credit,
                reference_id, transaction_date, financial_year
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(transaction.user_id)
        .bind(transaction.transaction_type)
        .bind(&transaction.description)
        .bind(transaction.debit)
        .bind(transaction.credit)
        .bind(transaction.reference_id)
        .bind(transaction.transaction_date)
        .bind(&transaction.financial_year)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn get_by_id(&self, id: i64) -> RepoResult<Option<Transaction>> {
        let transaction =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(transaction)
    }

    async fn list_by_user(&self, user_id: i64, page: Page) -> RepoResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_by_type(
        &self,
        transaction_type: TransactionType,
        page: Page,
    ) -> RepoResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE transaction_type = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(transaction_type)
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(page.limit)
        .bind(page.skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, transaction: &Transaction) -> RepoResult<Transaction> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET transaction_type = $1, description = $2, debit = $3, credit = $4,
                transaction_date = $5, financial_year = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(transaction.transaction_type)
        .bind(&transaction.description)
        .bind(transaction.debit)
        .bind(transaction.credit)
        .bind(transaction.transaction_date)
        .bind(&transaction.financial_year)
        .bind(transaction.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        let rows = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }
}

/// Settings store backed by the `system_settings` table
#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PgSettingsRepository {
    async fn get_by_key(&self, key: &str) -> RepoResult<Option<SystemSetting>> {
        let setting =
            sqlx::query_as::<_, SystemSetting>("SELECT * FROM system_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(setting)
    }

    async fn upsert(
        &self,
        key: &str,
        value: &str,
        description: Option<&str>,
    ) -> RepoResult<SystemSetting> {
        let setting = sqlx::query_as::<_, SystemSetting>(
            r#"
            INSERT INTO system_settings (key, value, description)
            VALUES ($1, $2, $3)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value,
                description = COALESCE(EXCLUDED.description, system_settings.description),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(setting)
    }

    async fn list(&self) -> RepoResult<Vec<SystemSetting>> {
        let rows = sqlx::query_as::<_, SystemSetting>(
            "SELECT * FROM system_settings ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
