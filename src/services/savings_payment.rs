//! Payment ledger service
//!
//! Appends individual payment facts and serves per-member aggregates.
//! Payments carry no status and are never deduplicated.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{
    CreateSavingsPaymentRequest, NewSavingsPayment, Page, PaymentSummary, SavingsPayment,
    UpdateSavingsPaymentRequest,
};
use crate::repository::{RepositoryError, SavingsPaymentRepository};

/// Payment ledger service errors
#[derive(Error, Debug)]
pub enum SavingsPaymentError {
    #[error("Savings payment with id {0} not found")]
    NotFound(i64),

    #[error("User ID must be valid")]
    InvalidUser,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<SavingsPaymentError> for ApiError {
    fn from(err: SavingsPaymentError) -> Self {
        match err {
            SavingsPaymentError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SavingsPaymentError::InvalidUser => ApiError::ValidationError(err.to_string()),
            SavingsPaymentError::Repository(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Append-only payment ledger service
pub struct SavingsPaymentService<R> {
    payments: R,
}

impl<R: SavingsPaymentRepository> SavingsPaymentService<R> {
    pub fn new(payments: R) -> Self {
        Self { payments }
    }

    /// Record a payment fact; no duplicate check by design
    pub async fn create(
        &self,
        request: CreateSavingsPaymentRequest,
        financial_year: Option<String>,
    ) -> Result<SavingsPayment, SavingsPaymentError> {
        if request.user_id <= 0 {
            return Err(SavingsPaymentError::InvalidUser);
        }

        let payment = self
            .payments
            .create(NewSavingsPayment {
                user_id: request.user_id,
                amount: request.amount,
                kind: request.kind,
                payment_date: request.payment_date.unwrap_or_else(Utc::now),
                payment_month: request.payment_month,
                description: request.description,
                financial_year,
            })
            .await?;

        Ok(payment)
    }

    /// Correct a recorded payment (admin)
    pub async fn update(
        &self,
        payment_id: i64,
        request: UpdateSavingsPaymentRequest,
    ) -> Result<SavingsPayment, SavingsPaymentError> {
        let mut payment = self.get(payment_id).await?;
        payment.apply_update(&request);
        Ok(self.payments.update(&payment).await?)
    }

    pub async fn delete(&self, payment_id: i64) -> Result<(), SavingsPaymentError> {
        if !self.payments.delete(payment_id).await? {
            return Err(SavingsPaymentError::NotFound(payment_id));
        }
        Ok(())
    }

    pub async fn get(&self, payment_id: i64) -> Result<SavingsPayment, SavingsPaymentError> {
        self.payments
            .get_by_id(payment_id)
            .await?
            .ok_or(SavingsPaymentError::NotFound(payment_id))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<SavingsPayment>, SavingsPaymentError> {
        Ok(self.payments.list(page).await?)
    }

    pub async fn list_for_user(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<SavingsPayment>, SavingsPaymentError> {
        Ok(self.payments.list_by_user(user_id, page).await?)
    }

    pub async fn total_paid_for_user(&self, user_id: i64) -> Result<Decimal, SavingsPaymentError> {
        Ok(self.payments.total_paid_by_user(user_id).await?)
    }

    pub async fn count_for_user(&self, user_id: i64) -> Result<i64, SavingsPaymentError> {
        Ok(self.payments.count_by_user(user_id).await?)
    }

    /// Per-member summary computed fresh from the ledger
    pub async fn summary_for_user(
        &self,
        user_id: i64,
    ) -> Result<PaymentSummary, SavingsPaymentError> {
        Ok(PaymentSummary {
            user_id,
            total_paid: self.payments.total_paid_by_user(user_id).await?,
            payment_count: self.payments.count_by_user(user_id).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentKind;
    use crate::repository::memory::MemorySavingsPaymentRepository;
    use rust_decimal_macros::dec;

    fn service() -> SavingsPaymentService<MemorySavingsPaymentRepository> {
        SavingsPaymentService::new(MemorySavingsPaymentRepository::new())
    }

    fn payment_of(user_id: i64, amount: Decimal) -> CreateSavingsPaymentRequest {
        CreateSavingsPaymentRequest {
            user_id,
            amount,
            kind: PaymentKind::MonthlySavings,
            payment_date: None,
            payment_month: Some("January".to_string()),
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_user() {
        let service = service();
        let result = service.create(payment_of(0, dec!(100)), None).await;
        assert!(matches!(result, Err(SavingsPaymentError::InvalidUser)));
    }

    #[tokio::test]
    async fn test_duplicate_payments_are_allowed() {
        let service = service();
        service.create(payment_of(1, dec!(1000)), None).await.unwrap();
        service.create(payment_of(1, dec!(1000)), None).await.unwrap();

        assert_eq!(service.count_for_user(1).await.unwrap(), 2);
        assert_eq!(service.total_paid_for_user(1).await.unwrap(), dec!(2000));
    }

    #[tokio::test]
    async fn test_summary_aggregates_per_member() {
        let service = service();
        service.create(payment_of(1, dec!(1500)), None).await.unwrap();
        service.create(payment_of(1, dec!(500)), None).await.unwrap();
        service.create(payment_of(2, dec!(9000)), None).await.unwrap();

        let summary = service.summary_for_user(1).await.unwrap();
        assert_eq!(summary.total_paid, dec!(2000));
        assert_eq!(summary.payment_count, 2);
    }

    #[tokio::test]
    async fn test_update_missing_payment() {
        let service = service();
        let result = service
            .update(
                7,
                UpdateSavingsPaymentRequest {
                    amount: Some(dec!(100)),
                    kind: None,
                    payment_date: None,
                    payment_month: None,
                    description: None,
                },
            )
            .await;
        assert!(matches!(result, Err(SavingsPaymentError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let payment = service.create(payment_of(1, dec!(100)), None).await.unwrap();
        service.delete(payment.id).await.unwrap();

        let result = service.delete(payment.id).await;
        assert!(matches!(result, Err(SavingsPaymentError::NotFound(_))));
    }
}
