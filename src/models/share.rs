//! Share holdings model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

/// Member share holding; total value is derived from count and unit value
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Share {
    pub id: i64,
    pub user_id: i64,
    pub shares_count: i32,
    pub share_value: Decimal,
    pub total_value: Decimal,
    pub purchase_date: DateTime<Utc>,
    pub financial_year: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Share {
    pub fn total_value_for(shares_count: i32, share_value: Decimal) -> Decimal {
        Decimal::from(shares_count) * share_value
    }

    /// Add shares at a (possibly new) unit value and recompute the total
    pub fn add_shares(&mut self, count: i32, value_per_share: Decimal) {
        self.shares_count += count;
        self.share_value = value_per_share;
        self.recalculate();
    }

    /// Change the unit value and recompute the total
    pub fn update_share_value(&mut self, new_value: Decimal) {
        self.share_value = new_value;
        self.recalculate();
    }

    /// Recompute `total_value` from the current count and unit value
    pub fn recalculate(&mut self) {
        self.total_value = Self::total_value_for(self.shares_count, self.share_value);
        self.updated_at = Utc::now();
    }
}

/// Fields required to insert a new share row
#[derive(Debug, Clone)]
pub struct NewShare {
    pub user_id: i64,
    pub shares_count: i32,
    pub share_value: Decimal,
    pub total_value: Decimal,
    pub purchase_date: DateTime<Utc>,
    pub financial_year: Option<String>,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request to record a share purchase
#[derive(Debug, Deserialize)]
pub struct CreateShareRequest {
    pub user_id: i64,
    pub shares_count: i32,
    pub share_value: Decimal,
    pub purchase_date: Option<DateTime<Utc>>,
}

/// Request to edit a share holding (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateShareRequest {
    pub shares_count: Option<i32>,
    pub share_value: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_share(count: i32, value: Decimal) -> Share {
        Share {
            id: 1,
            user_id: 1,
            shares_count: count,
            share_value: value,
            total_value: Share::total_value_for(count, value),
            purchase_date: Utc::now(),
            financial_year: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_value_derivation() {
        assert_eq!(Share::total_value_for(10, dec!(500)), dec!(5000));
        assert_eq!(Share::total_value_for(0, dec!(500)), Decimal::ZERO);
    }

    #[test]
    fn test_add_shares_recomputes_total() {
        let mut share = test_share(10, dec!(500));
        share.add_shares(5, dec!(600));

        assert_eq!(share.shares_count, 15);
        assert_eq!(share.share_value, dec!(600));
        assert_eq!(share.total_value, dec!(9000));
    }

    #[test]
    fn test_update_share_value_overwrites_total() {
        let mut share = test_share(10, dec!(500));
        share.update_share_value(dec!(550));

        assert_eq!(share.total_value, dec!(5500));
    }
}
