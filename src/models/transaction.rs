//! Ledger transaction model
//!
//! Each row classifies a money movement as a credit (money in from the
//! member) or a debit (money out to the member), based on a fixed mapping
//! from transaction type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

/// Transaction type enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Savings,
    Share,
    LoanDisbursement,
    LoanRepayment,
    Withdrawal,
    Deposit,
}

impl TransactionType {
    /// Fixed classification table: savings, share purchases, loan repayments
    /// and deposits are money in from the member; withdrawals and loan
    /// disbursements are money out.
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionType::Savings
                | TransactionType::Share
                | TransactionType::LoanRepayment
                | TransactionType::Deposit
        )
    }

    /// Split an amount into (debit, credit) according to the type
    pub fn classify(&self, amount: Decimal) -> (Decimal, Decimal) {
        if self.is_credit() {
            (Decimal::ZERO, amount)
        } else {
            (amount, Decimal::ZERO)
        }
    }
}

/// Ledger row for a member's account
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub transaction_type: TransactionType,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Running balance is not computed anywhere; the column persists
    /// whatever was supplied at creation (zero by default).
    pub balance: Decimal,
    pub reference_id: Option<i64>,
    pub transaction_date: DateTime<Utc>,
    pub financial_year: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.debit > Decimal::ZERO
    }

    pub fn is_credit(&self) -> bool {
        self.credit > Decimal::ZERO
    }
}

/// Fields required to insert a new transaction row
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: i64,
    pub transaction_type: TransactionType,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub reference_id: Option<i64>,
    pub transaction_date: DateTime<Utc>,
    pub financial_year: Option<String>,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to record a transaction
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub user_id: i64,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
    pub reference_id: Option<i64>,
    pub transaction_date: Option<DateTime<Utc>>,
}

/// Request to correct a transaction (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    pub transaction_type: Option<TransactionType>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub transaction_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_classification_table() {
        assert!(TransactionType::Savings.is_credit());
        assert!(TransactionType::Share.is_credit());
        assert!(TransactionType::LoanRepayment.is_credit());
        assert!(TransactionType::Deposit.is_credit());

        assert!(!TransactionType::Withdrawal.is_credit());
        assert!(!TransactionType::LoanDisbursement.is_credit());
    }

    #[test]
    fn test_classify_splits_exclusively() {
        let (debit, credit) = TransactionType::Savings.classify(dec!(1000));
        assert_eq!(debit, Decimal::ZERO);
        assert_eq!(credit, dec!(1000));

        let (debit, credit) = TransactionType::LoanDisbursement.classify(dec!(1000));
        assert_eq!(debit, dec!(1000));
        assert_eq!(credit, Decimal::ZERO);
    }
}
