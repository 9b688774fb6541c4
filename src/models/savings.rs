//! Period-based savings model
//!
//! One row per (member, month, year) obligation, tracking paid against
//! expected. Status is derived purely from the two amounts.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

/// Savings payment status enum
///
/// `Missed` is representable in storage but never assigned by any operation;
/// it is reserved for a future end-of-period sweep.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SavingsStatus {
    Paid,
    Pending,
    Partial,
    Missed,
}

/// Monthly savings obligation for a member
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Savings {
    pub id: i64,
    pub user_id: i64,
    pub month: String,
    pub year: i32,
    pub expected_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: SavingsStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub financial_year: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Savings {
    /// Status as a pure function of (paid, expected)
    pub fn derive_status(paid_amount: Decimal, expected_amount: Decimal) -> SavingsStatus {
        if paid_amount >= expected_amount {
            SavingsStatus::Paid
        } else if paid_amount > Decimal::ZERO {
            SavingsStatus::Partial
        } else {
            SavingsStatus::Pending
        }
    }

    /// Record an additive payment and re-derive status
    pub fn record_payment(&mut self, amount: Decimal, payment_date: Option<DateTime<Utc>>) {
        self.paid_amount += amount;
        self.payment_date = Some(payment_date.unwrap_or_else(Utc::now));
        self.updated_at = Utc::now();
        self.update_status();
    }

    /// Re-derive status from the current amounts
    pub fn update_status(&mut self) {
        self.status = Self::derive_status(self.paid_amount, self.expected_amount);
    }

    pub fn is_fully_paid(&self) -> bool {
        self.paid_amount >= self.expected_amount
    }

    /// Remaining amount to be paid, floored at zero
    pub fn remaining_amount(&self) -> Decimal {
        (self.expected_amount - self.paid_amount).max(Decimal::ZERO)
    }
}

/// Fields required to insert a new savings row
#[derive(Debug, Clone)]
pub struct NewSavings {
    pub user_id: i64,
    pub month: String,
    pub year: i32,
    pub expected_amount: Decimal,
    pub paid_amount: Decimal,
    pub status: SavingsStatus,
    pub financial_year: Option<String>,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to open a savings period for a member
#[derive(Debug, Deserialize)]
pub struct CreateSavingsRequest {
    pub user_id: i64,
    pub month: String,
    pub year: i32,
    pub expected_amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
}

/// Request to record a payment against a savings period
#[derive(Debug, Deserialize)]
pub struct SavingsPaymentRequest {
    pub amount: Decimal,
    pub payment_date: Option<DateTime<Utc>>,
}

/// Request to overwrite savings amounts (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateSavingsRequest {
    pub expected_amount: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_savings(expected: Decimal, paid: Decimal) -> Savings {
        Savings {
            id: 1,
            user_id: 1,
            month: "January".to_string(),
            year: 2025,
            expected_amount: expected,
            paid_amount: paid,
            status: Savings::derive_status(paid, expected),
            payment_date: None,
            financial_year: Some("2024-2025".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_derive_status() {
        assert_eq!(
            Savings::derive_status(dec!(0), dec!(5000)),
            SavingsStatus::Pending
        );
        assert_eq!(
            Savings::derive_status(dec!(2000), dec!(5000)),
            SavingsStatus::Partial
        );
        assert_eq!(
            Savings::derive_status(dec!(5000), dec!(5000)),
            SavingsStatus::Paid
        );
        assert_eq!(
            Savings::derive_status(dec!(6000), dec!(5000)),
            SavingsStatus::Paid
        );
    }

    #[test]
    fn test_derive_status_plane_sweep() {
        // Sweep the (paid, expected) plane: the derived status must agree
        // with the defining inequalities at every point.
        for paid_cents in (0..=10_000i64).step_by(250) {
            for expected_cents in (0..=10_000i64).step_by(250) {
                let paid = Decimal::new(paid_cents, 2);
                let expected = Decimal::new(expected_cents, 2);
                let status = Savings::derive_status(paid, expected);

                if paid >= expected {
                    assert_eq!(status, SavingsStatus::Paid, "paid={} expected={}", paid, expected);
                } else if paid > Decimal::ZERO {
                    assert_eq!(status, SavingsStatus::Partial, "paid={} expected={}", paid, expected);
                } else {
                    assert_eq!(status, SavingsStatus::Pending, "paid={} expected={}", paid, expected);
                }
            }
        }
    }

    #[test]
    fn test_payments_accumulate() {
        let mut savings = test_savings(dec!(5000), dec!(0));
        assert_eq!(savings.status, SavingsStatus::Pending);

        savings.record_payment(dec!(2000), None);
        assert_eq!(savings.paid_amount, dec!(2000));
        assert_eq!(savings.status, SavingsStatus::Partial);

        savings.record_payment(dec!(3000), None);
        assert_eq!(savings.paid_amount, dec!(5000));
        assert_eq!(savings.status, SavingsStatus::Paid);
        assert!(savings.payment_date.is_some());
    }

    #[test]
    fn test_remaining_amount_floored_at_zero() {
        let mut savings = test_savings(dec!(5000), dec!(0));
        assert_eq!(savings.remaining_amount(), dec!(5000));

        savings.record_payment(dec!(6000), None);
        assert_eq!(savings.remaining_amount(), Decimal::ZERO);
        assert!(savings.is_fully_paid());
    }
}
