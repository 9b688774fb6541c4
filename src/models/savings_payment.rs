//! Event-based payment ledger
//!
//! Individual payment facts, appended as they happen. Unlike the period
//! rows in [`super::savings`], a payment carries no status; totals are
//! aggregated on demand by the repository.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

/// Payment kind enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentKind {
    #[serde(rename = "Monthly Savings")]
    MonthlySavings,
    #[serde(rename = "Share Purchase")]
    SharePurchase,
    #[serde(rename = "Loan Repayment")]
    LoanRepayment,
    #[serde(rename = "Registration Fee")]
    RegistrationFee,
    #[serde(rename = "Other")]
    Other,
}

/// A recorded member payment
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct SavingsPayment {
    pub id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub kind: PaymentKind,
    pub payment_date: DateTime<Utc>,
    pub payment_month: Option<String>,
    pub description: Option<String>,
    pub financial_year: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SavingsPayment {
    /// Overwrite the provided fields
    pub fn apply_update(&mut self, update: &UpdateSavingsPaymentRequest) {
        if let Some(amount) = update.amount {
            self.amount = amount;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(payment_date) = update.payment_date {
            self.payment_date = payment_date;
        }
        if let Some(payment_month) = &update.payment_month {
            self.payment_month = Some(payment_month.clone());
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
    }
}

/// Fields required to insert a new payment row
#[derive(Debug, Clone)]
pub struct NewSavingsPayment {
    pub user_id: i64,
    pub amount: Decimal,
    pub kind: PaymentKind,
    pub payment_date: DateTime<Utc>,
    pub payment_month: Option<String>,
    pub description: Option<String>,
    pub financial_year: Option<String>,
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Request to record a payment
#[derive(Debug, Deserialize)]
pub struct CreateSavingsPaymentRequest {
    pub user_id: i64,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_month: Option<String>,
    pub description: Option<String>,
}

/// Request to correct a recorded payment (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateSavingsPaymentRequest {
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub kind: Option<PaymentKind>,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_month: Option<String>,
    pub description: Option<String>,
}

/// Per-member payment summary
#[derive(Debug, Serialize)]
pub struct PaymentSummary {
    pub user_id: i64,
    pub total_paid: Decimal,
    pub payment_count: i64,
}
