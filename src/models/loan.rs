//! Loan model and repayment arithmetic

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use validator::Validate;

/// Loan status enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Active,
    Closed,
    Rejected,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Active => "active",
            LoanStatus::Closed => "closed",
            LoanStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member loan with simple, non-compounding interest computed at creation
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Loan {
    pub id: i64,
    pub user_id: i64,
    pub loan_amount: Decimal,
    /// Annual interest rate as a percentage (e.g. 10.50 for 10.5%)
    pub interest_rate: Decimal,
    pub duration_months: i32,
    pub monthly_repayment: Decimal,
    pub total_repayable: Decimal,
    pub amount_paid: Decimal,
    pub balance: Decimal,
    pub status: LoanStatus,
    pub application_date: DateTime<Utc>,
    pub approval_date: Option<DateTime<Utc>>,
    pub disbursement_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub financial_year: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Loan {
    /// Principal plus simple interest: `amount + amount * rate / 100`
    pub fn total_repayable_for(amount: Decimal, rate: Decimal) -> Decimal {
        amount + amount * rate / Decimal::ONE_HUNDRED
    }

    /// Total divided evenly over the term; zero for a zero-month term
    pub fn monthly_repayment_for(total_repayable: Decimal, duration_months: i32) -> Decimal {
        if duration_months > 0 {
            total_repayable / Decimal::from(duration_months)
        } else {
            Decimal::ZERO
        }
    }

    /// Approve the loan application
    pub fn approve(&mut self) {
        self.status = LoanStatus::Approved;
        self.approval_date = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Mark the loan as disbursed and active
    pub fn disburse(&mut self) {
        self.status = LoanStatus::Active;
        self.disbursement_date = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Apply a repayment against the outstanding balance.
    ///
    /// The balance is floored at zero; reaching zero closes the loan.
    pub fn record_repayment(&mut self, amount: Decimal) {
        self.amount_paid += amount;
        self.balance = self.total_repayable - self.amount_paid;
        self.updated_at = Utc::now();

        if self.balance <= Decimal::ZERO {
            self.balance = Decimal::ZERO;
            self.close();
        }
    }

    /// Close the loan (no status guard; closing a closed loan is a no-op)
    pub fn close(&mut self) {
        self.status = LoanStatus::Closed;
        self.updated_at = Utc::now();
    }

    /// Reject the loan application
    pub fn reject(&mut self) {
        self.status = LoanStatus::Rejected;
        self.updated_at = Utc::now();
    }

    /// Recompute derived totals after an amount/rate/duration edit.
    ///
    /// The balance is only reset while no repayment has been recorded;
    /// once `amount_paid > 0` the stored balance is left untouched.
    pub fn recalculate(&mut self) {
        self.total_repayable = Self::total_repayable_for(self.loan_amount, self.interest_rate);
        self.monthly_repayment =
            Self::monthly_repayment_for(self.total_repayable, self.duration_months);
        if self.amount_paid.is_zero() {
            self.balance = self.total_repayable;
        }
        self.updated_at = Utc::now();
    }

    pub fn is_fully_paid(&self) -> bool {
        self.balance <= Decimal::ZERO
    }
}

/// Fields required to insert a new loan row
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub user_id: i64,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub duration_months: i32,
    pub monthly_repayment: Decimal,
    pub total_repayable: Decimal,
    pub balance: Decimal,
    pub status: LoanStatus,
    pub description: Option<String>,
    pub financial_year: Option<String>,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to apply for a loan
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLoanRequest {
    pub user_id: i64,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    #[validate(range(min = 0))]
    pub duration_months: i32,
    pub description: Option<String>,
}

/// Request to edit loan terms (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateLoanRequest {
    pub loan_amount: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub duration_months: Option<i32>,
    pub description: Option<String>,
}

/// Request to record a repayment
#[derive(Debug, Deserialize)]
pub struct LoanRepaymentRequest {
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_loan(amount: Decimal, rate: Decimal, months: i32) -> Loan {
        let total = Loan::total_repayable_for(amount, rate);
        Loan {
            id: 1,
            user_id: 1,
            loan_amount: amount,
            interest_rate: rate,
            duration_months: months,
            monthly_repayment: Loan::monthly_repayment_for(total, months),
            total_repayable: total,
            amount_paid: Decimal::ZERO,
            balance: total,
            status: LoanStatus::Pending,
            application_date: Utc::now(),
            approval_date: None,
            disbursement_date: None,
            description: None,
            financial_year: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_repayable_simple_interest() {
        assert_eq!(
            Loan::total_repayable_for(dec!(10000), dec!(10)),
            dec!(11000)
        );
        assert_eq!(Loan::total_repayable_for(dec!(5000), dec!(0)), dec!(5000));
        assert_eq!(
            Loan::total_repayable_for(dec!(2500.50), dec!(12.5)),
            dec!(2500.50) + dec!(2500.50) * dec!(12.5) / dec!(100)
        );
    }

    #[test]
    fn test_monthly_repayment() {
        let monthly = Loan::monthly_repayment_for(dec!(11000), 12);
        assert_eq!(monthly.round_dp(2), dec!(916.67));

        // Zero-month term yields zero, not a division error
        assert_eq!(Loan::monthly_repayment_for(dec!(11000), 0), Decimal::ZERO);
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let mut loan = test_loan(dec!(10000), dec!(10), 12);
        assert_eq!(loan.total_repayable, dec!(11000));
        assert_eq!(loan.balance, dec!(11000));

        loan.approve();
        assert_eq!(loan.status, LoanStatus::Approved);
        assert!(loan.approval_date.is_some());

        loan.disburse();
        assert_eq!(loan.status, LoanStatus::Active);
        assert!(loan.disbursement_date.is_some());

        loan.record_repayment(dec!(11000));
        assert_eq!(loan.balance, Decimal::ZERO);
        assert_eq!(loan.status, LoanStatus::Closed);
    }

    #[test]
    fn test_repayment_reduces_balance() {
        let mut loan = test_loan(dec!(10000), dec!(10), 12);
        loan.disburse();

        loan.record_repayment(dec!(3000));
        assert_eq!(loan.amount_paid, dec!(3000));
        assert_eq!(loan.balance, dec!(8000));
        assert_eq!(loan.status, LoanStatus::Active);

        loan.record_repayment(dec!(5000));
        assert_eq!(loan.balance, dec!(3000));
        assert_eq!(loan.status, LoanStatus::Active);
    }

    #[test]
    fn test_overpayment_floors_balance_at_zero() {
        let mut loan = test_loan(dec!(1000), dec!(5), 6);
        loan.disburse();

        loan.record_repayment(dec!(2000));
        assert_eq!(loan.balance, Decimal::ZERO);
        assert_eq!(loan.status, LoanStatus::Closed);
        assert!(loan.is_fully_paid());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut loan = test_loan(dec!(1000), dec!(5), 6);
        loan.close();
        assert_eq!(loan.status, LoanStatus::Closed);
        loan.close();
        assert_eq!(loan.status, LoanStatus::Closed);
    }

    #[test]
    fn test_recalculate_before_any_repayment() {
        let mut loan = test_loan(dec!(10000), dec!(10), 12);
        loan.loan_amount = dec!(20000);
        loan.recalculate();

        assert_eq!(loan.total_repayable, dec!(22000));
        assert_eq!(loan.balance, dec!(22000));
    }

    #[test]
    fn test_recalculate_after_partial_repayment_keeps_balance() {
        let mut loan = test_loan(dec!(10000), dec!(10), 12);
        loan.disburse();
        loan.record_repayment(dec!(1000));
        let balance_before = loan.balance;

        loan.loan_amount = dec!(20000);
        loan.recalculate();

        // Totals track the new terms, but the balance is deliberately not
        // reconciled once money has moved.
        assert_eq!(loan.total_repayable, dec!(22000));
        assert_eq!(loan.balance, balance_before);
    }
}
