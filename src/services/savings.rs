//! Period-based savings service
//!
//! One record per (member, month, year); duplicate periods are rejected.
//! Payments accumulate additively, administrative edits overwrite, and
//! both re-derive the status from paid versus expected.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{
    CreateSavingsRequest, NewSavings, Page, Savings, SavingsPaymentRequest, UpdateSavingsRequest,
};
use crate::repository::{RepositoryError, SavingsRepository};

/// Savings service errors
#[derive(Error, Debug)]
pub enum SavingsError {
    #[error("Savings record not found")]
    NotFound,

    #[error("Savings record already exists for {month} {year}")]
    DuplicatePeriod { month: String, year: i32 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<SavingsError> for ApiError {
    fn from(err: SavingsError) -> Self {
        match err {
            SavingsError::NotFound => ApiError::NotFound(err.to_string()),
            SavingsError::DuplicatePeriod { .. } => ApiError::BadRequest(err.to_string()),
            SavingsError::Repository(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Savings contribution accounting service
pub struct SavingsService<R> {
    savings: R,
}

impl<R: SavingsRepository> SavingsService<R> {
    pub fn new(savings: R) -> Self {
        Self { savings }
    }

    /// Open a savings period for a member; rejects a duplicate period
    pub async fn create(
        &self,
        request: CreateSavingsRequest,
        financial_year: Option<String>,
    ) -> Result<Savings, SavingsError> {
        let existing = self
            .savings
            .get_by_user_and_period(request.user_id, &request.month, request.year)
            .await?;
        if existing.is_some() {
            return Err(SavingsError::DuplicatePeriod {
                month: request.month,
                year: request.year,
            });
        }

        let status = Savings::derive_status(request.paid_amount, request.expected_amount);

        let savings = self
            .savings
            .create(NewSavings {
                user_id: request.user_id,
                month: request.month,
                year: request.year,
                expected_amount: request.expected_amount,
                paid_amount: request.paid_amount,
                status,
                financial_year,
            })
            .await?;

        Ok(savings)
    }

    /// Record an additive payment against a savings period
    pub async fn record_payment(
        &self,
        savings_id: i64,
        request: SavingsPaymentRequest,
    ) -> Result<Savings, SavingsError> {
        let mut savings = self.get(savings_id).await?;
        savings.record_payment(request.amount, request.payment_date);
        Ok(self.savings.update(&savings).await?)
    }

    /// Overwrite amounts (admin correction) and re-derive status
    pub async fn update(
        &self,
        savings_id: i64,
        request: UpdateSavingsRequest,
    ) -> Result<Savings, SavingsError> {
        let mut savings = self.get(savings_id).await?;

        if let Some(expected_amount) = request.expected_amount {
            savings.expected_amount = expected_amount;
        }
        if let Some(paid_amount) = request.paid_amount {
            savings.paid_amount = paid_amount;
        }

        savings.update_status();
        Ok(self.savings.update(&savings).await?)
    }

    pub async fn delete(&self, savings_id: i64) -> Result<(), SavingsError> {
        if !self.savings.delete(savings_id).await? {
            return Err(SavingsError::NotFound);
        }
        Ok(())
    }

    pub async fn get(&self, savings_id: i64) -> Result<Savings, SavingsError> {
        self.savings
            .get_by_id(savings_id)
            .await?
            .ok_or(SavingsError::NotFound)
    }

    pub async fn list_for_user(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<Savings>, SavingsError> {
        Ok(self.savings.list_by_user(user_id, page).await?)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Savings>, SavingsError> {
        Ok(self.savings.list(page).await?)
    }

    pub async fn total_paid_for_user(&self, user_id: i64) -> Result<Decimal, SavingsError> {
        Ok(self.savings.total_paid_by_user(user_id).await?)
    }

    pub async fn total_expected_for_user(&self, user_id: i64) -> Result<Decimal, SavingsError> {
        Ok(self.savings.total_expected_by_user(user_id).await?)
    }

    pub async fn total_paid_all(&self) -> Result<Decimal, SavingsError> {
        Ok(self.savings.total_paid_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SavingsStatus;
    use crate::repository::memory::MemorySavingsRepository;
    use rust_decimal_macros::dec;

    fn service() -> SavingsService<MemorySavingsRepository> {
        SavingsService::new(MemorySavingsRepository::new())
    }

    fn january(expected: Decimal, paid: Decimal) -> CreateSavingsRequest {
        CreateSavingsRequest {
            user_id: 1,
            month: "January".to_string(),
            year: 2025,
            expected_amount: expected,
            paid_amount: paid,
        }
    }

    #[tokio::test]
    async fn test_create_derives_status() {
        let service = service();
        let savings = service.create(january(dec!(5000), dec!(0)), None).await.unwrap();
        assert_eq!(savings.status, SavingsStatus::Pending);

        let savings = service
            .create(
                CreateSavingsRequest {
                    month: "February".to_string(),
                    ..january(dec!(5000), dec!(2500))
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(savings.status, SavingsStatus::Partial);
    }

    #[tokio::test]
    async fn test_duplicate_period_rejected() {
        let service = service();
        service.create(january(dec!(5000), dec!(0)), None).await.unwrap();

        let result = service.create(january(dec!(5000), dec!(0)), None).await;
        assert!(matches!(
            result,
            Err(SavingsError::DuplicatePeriod { year: 2025, .. })
        ));

        // No second row was created
        assert_eq!(service.list(Page::all()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_period_different_member_is_fine() {
        let service = service();
        service.create(january(dec!(5000), dec!(0)), None).await.unwrap();

        let other = CreateSavingsRequest {
            user_id: 2,
            ..january(dec!(5000), dec!(0))
        };
        assert!(service.create(other, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_payments_accumulate_through_statuses() {
        let service = service();
        let savings = service.create(january(dec!(5000), dec!(0)), None).await.unwrap();
        assert_eq!(savings.status, SavingsStatus::Pending);

        let savings = service
            .record_payment(
                savings.id,
                SavingsPaymentRequest {
                    amount: dec!(2000),
                    payment_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(savings.paid_amount, dec!(2000));
        assert_eq!(savings.status, SavingsStatus::Partial);

        let savings = service
            .record_payment(
                savings.id,
                SavingsPaymentRequest {
                    amount: dec!(3000),
                    payment_date: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(savings.paid_amount, dec!(5000));
        assert_eq!(savings.status, SavingsStatus::Paid);
    }

    #[tokio::test]
    async fn test_record_payment_not_found() {
        let service = service();
        let result = service
            .record_payment(
                99,
                SavingsPaymentRequest {
                    amount: dec!(100),
                    payment_date: None,
                },
            )
            .await;
        assert!(matches!(result, Err(SavingsError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_overwrites_and_rederives() {
        let service = service();
        let savings = service.create(january(dec!(5000), dec!(5000)), None).await.unwrap();
        assert_eq!(savings.status, SavingsStatus::Paid);

        let savings = service
            .update(
                savings.id,
                UpdateSavingsRequest {
                    expected_amount: Some(dec!(8000)),
                    paid_amount: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(savings.status, SavingsStatus::Partial);
    }

    #[tokio::test]
    async fn test_aggregates() {
        let service = service();
        service.create(january(dec!(5000), dec!(2000)), None).await.unwrap();
        service
            .create(
                CreateSavingsRequest {
                    month: "February".to_string(),
                    ..january(dec!(5000), dec!(5000))
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(service.total_paid_for_user(1).await.unwrap(), dec!(7000));
        assert_eq!(
            service.total_expected_for_user(1).await.unwrap(),
            dec!(10000)
        );
        assert_eq!(service.total_paid_all().await.unwrap(), dec!(7000));
    }
}
