//! Loan lifecycle service
//!
//! State machine over {pending, approved, active, closed, rejected}:
//! approve requires pending, disburse requires approved, repayments are
//! accepted while active or approved, reject requires pending. Close has
//! no guard. A repayment that clears the balance closes the loan.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{
    CreateLoanRequest, Loan, LoanRepaymentRequest, LoanStatus, NewLoan, Page, UpdateLoanRequest,
};
use crate::repository::{LoanRepository, RepositoryError};

/// Loan service errors
#[derive(Error, Debug)]
pub enum LoanError {
    #[error("Loan not found")]
    NotFound,

    #[error("Cannot {operation} loan in {status} status")]
    InvalidStatus {
        operation: &'static str,
        status: LoanStatus,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<LoanError> for ApiError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::NotFound => ApiError::NotFound(err.to_string()),
            LoanError::InvalidStatus { .. } => ApiError::BadRequest(err.to_string()),
            LoanError::Repository(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Loan lifecycle and repayment accounting service
pub struct LoanService<R> {
    loans: R,
}

impl<R: LoanRepository> LoanService<R> {
    pub fn new(loans: R) -> Self {
        Self { loans }
    }

    /// Create a loan application in pending status with derived totals
    pub async fn create(
        &self,
        request: CreateLoanRequest,
        financial_year: Option<String>,
    ) -> Result<Loan, LoanError> {
        // Members may hold several loans at once; surfaced for operators
        // but intentionally not enforced.
        let active = self.loans.active_loans_for_user(request.user_id).await?;
        if !active.is_empty() {
            tracing::debug!(
                user_id = request.user_id,
                active_loans = active.len(),
                "Member applying for a loan while holding active loans"
            );
        }

        let total_repayable =
            Loan::total_repayable_for(request.loan_amount, request.interest_rate);
        let monthly_repayment =
            Loan::monthly_repayment_for(total_repayable, request.duration_months);

        let loan = self
            .loans
            .create(NewLoan {
                user_id: request.user_id,
                loan_amount: request.loan_amount,
                interest_rate: request.interest_rate,
                duration_months: request.duration_months,
                monthly_repayment,
                total_repayable,
                balance: total_repayable,
                status: LoanStatus::Pending,
                description: request.description,
                financial_year,
            })
            .await?;

        tracing::info!(loan_id = loan.id, user_id = loan.user_id, "Loan application created");

        Ok(loan)
    }

    /// Approve a pending loan
    pub async fn approve(&self, loan_id: i64) -> Result<Loan, LoanError> {
        let mut loan = self.get(loan_id).await?;

        if loan.status != LoanStatus::Pending {
            return Err(LoanError::InvalidStatus {
                operation: "approve",
                status: loan.status,
            });
        }

        loan.approve();
        Ok(self.loans.update(&loan).await?)
    }

    /// Disburse an approved loan, activating it
    pub async fn disburse(&self, loan_id: i64) -> Result<Loan, LoanError> {
        let mut loan = self.get(loan_id).await?;

        if loan.status != LoanStatus::Approved {
            return Err(LoanError::InvalidStatus {
                operation: "disburse",
                status: loan.status,
            });
        }

        loan.disburse();
        Ok(self.loans.update(&loan).await?)
    }

    /// Record a repayment against an active or approved loan
    pub async fn record_repayment(
        &self,
        loan_id: i64,
        request: LoanRepaymentRequest,
    ) -> Result<Loan, LoanError> {
        let mut loan = self.get(loan_id).await?;

        if !matches!(loan.status, LoanStatus::Active | LoanStatus::Approved) {
            return Err(LoanError::InvalidStatus {
                operation: "record repayment for",
                status: loan.status,
            });
        }

        loan.record_repayment(request.amount);
        let loan = self.loans.update(&loan).await?;

        if loan.status == LoanStatus::Closed {
            tracing::info!(loan_id = loan.id, "Loan fully repaid and closed");
        }

        Ok(loan)
    }

    /// Close a loan regardless of current status
    pub async fn close(&self, loan_id: i64) -> Result<Loan, LoanError> {
        let mut loan = self.get(loan_id).await?;
        loan.close();
        Ok(self.loans.update(&loan).await?)
    }

    /// Reject a pending loan application
    pub async fn reject(&self, loan_id: i64) -> Result<Loan, LoanError> {
        let mut loan = self.get(loan_id).await?;

        if loan.status != LoanStatus::Pending {
            return Err(LoanError::InvalidStatus {
                operation: "reject",
                status: loan.status,
            });
        }

        loan.reject();
        Ok(self.loans.update(&loan).await?)
    }

    /// Edit loan terms, recomputing derived totals.
    ///
    /// The balance is only re-derived while no repayment has been recorded.
    pub async fn update(
        &self,
        loan_id: i64,
        request: UpdateLoanRequest,
    ) -> Result<Loan, LoanError> {
        let mut loan = self.get(loan_id).await?;

        let terms_changed = request.loan_amount.is_some()
            || request.interest_rate.is_some()
            || request.duration_months.is_some();

        if let Some(loan_amount) = request.loan_amount {
            loan.loan_amount = loan_amount;
        }
        if let Some(interest_rate) = request.interest_rate {
            loan.interest_rate = interest_rate;
        }
        if let Some(duration_months) = request.duration_months {
            loan.duration_months = duration_months;
        }
        if let Some(description) = request.description {
            loan.description = Some(description);
        }

        if terms_changed {
            loan.recalculate();
        }

        Ok(self.loans.update(&loan).await?)
    }

    /// Hard-delete a loan
    pub async fn delete(&self, loan_id: i64) -> Result<(), LoanError> {
        if !self.loans.delete(loan_id).await? {
            return Err(LoanError::NotFound);
        }
        Ok(())
    }

    pub async fn get(&self, loan_id: i64) -> Result<Loan, LoanError> {
        self.loans
            .get_by_id(loan_id)
            .await?
            .ok_or(LoanError::NotFound)
    }

    pub async fn list_for_user(&self, user_id: i64, page: Page) -> Result<Vec<Loan>, LoanError> {
        Ok(self.loans.list_by_user(user_id, page).await?)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Loan>, LoanError> {
        Ok(self.loans.list(page).await?)
    }

    /// Outstanding balance over a member's active loans
    pub async fn outstanding_for_user(&self, user_id: i64) -> Result<Decimal, LoanError> {
        let loans = self.loans.active_loans_for_user(user_id).await?;
        Ok(loans.iter().map(|l| l.balance).sum())
    }

    pub async fn total_disbursed(&self) -> Result<Decimal, LoanError> {
        Ok(self.loans.total_disbursed().await?)
    }

    pub async fn total_outstanding(&self) -> Result<Decimal, LoanError> {
        Ok(self.loans.total_outstanding().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryLoanRepository;
    use rust_decimal_macros::dec;

    fn service() -> LoanService<MemoryLoanRepository> {
        LoanService::new(MemoryLoanRepository::new())
    }

    fn apply(amount: Decimal, rate: Decimal, months: i32) -> CreateLoanRequest {
        CreateLoanRequest {
            user_id: 1,
            loan_amount: amount,
            interest_rate: rate,
            duration_months: months,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_create_derives_totals() {
        let service = service();
        let loan = service
            .create(apply(dec!(10000), dec!(10), 12), Some("2024-2025".to_string()))
            .await
            .unwrap();

        assert_eq!(loan.status, LoanStatus::Pending);
        assert_eq!(loan.total_repayable, dec!(11000));
        assert_eq!(loan.monthly_repayment.round_dp(2), dec!(916.67));
        assert_eq!(loan.balance, dec!(11000));
        assert_eq!(loan.financial_year.as_deref(), Some("2024-2025"));
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let service = service();
        let loan = service
            .create(apply(dec!(10000), dec!(10), 12), None)
            .await
            .unwrap();

        let loan = service.approve(loan.id).await.unwrap();
        assert_eq!(loan.status, LoanStatus::Approved);

        let loan = service.disburse(loan.id).await.unwrap();
        assert_eq!(loan.status, LoanStatus::Active);

        let loan = service
            .record_repayment(loan.id, LoanRepaymentRequest { amount: dec!(11000) })
            .await
            .unwrap();
        assert_eq!(loan.balance, Decimal::ZERO);
        assert_eq!(loan.status, LoanStatus::Closed);
    }

    #[tokio::test]
    async fn test_approve_requires_pending() {
        let service = service();
        let loan = service
            .create(apply(dec!(1000), dec!(5), 6), None)
            .await
            .unwrap();
        service.approve(loan.id).await.unwrap();

        // Second approval fails and leaves the state unchanged
        let result = service.approve(loan.id).await;
        assert!(matches!(
            result,
            Err(LoanError::InvalidStatus {
                operation: "approve",
                status: LoanStatus::Approved
            })
        ));
        assert_eq!(service.get(loan.id).await.unwrap().status, LoanStatus::Approved);
    }

    #[tokio::test]
    async fn test_disburse_requires_approved() {
        let service = service();
        let loan = service
            .create(apply(dec!(1000), dec!(5), 6), None)
            .await
            .unwrap();

        let result = service.disburse(loan.id).await;
        assert!(matches!(result, Err(LoanError::InvalidStatus { .. })));
    }

    #[tokio::test]
    async fn test_repayment_rejected_while_pending() {
        let service = service();
        let loan = service
            .create(apply(dec!(1000), dec!(5), 6), None)
            .await
            .unwrap();

        let result = service
            .record_repayment(loan.id, LoanRepaymentRequest { amount: dec!(100) })
            .await;
        assert!(matches!(result, Err(LoanError::InvalidStatus { .. })));
    }

    #[tokio::test]
    async fn test_repayment_accepted_while_approved() {
        let service = service();
        let loan = service
            .create(apply(dec!(1000), dec!(0), 10), None)
            .await
            .unwrap();
        service.approve(loan.id).await.unwrap();

        let loan = service
            .record_repayment(loan.id, LoanRepaymentRequest { amount: dec!(400) })
            .await
            .unwrap();
        assert_eq!(loan.balance, dec!(600));
    }

    #[tokio::test]
    async fn test_reject_requires_pending() {
        let service = service();
        let loan = service
            .create(apply(dec!(1000), dec!(5), 6), None)
            .await
            .unwrap();
        service.approve(loan.id).await.unwrap();

        let result = service.reject(loan.id).await;
        assert!(matches!(result, Err(LoanError::InvalidStatus { .. })));
    }

    #[tokio::test]
    async fn test_close_twice_is_fine() {
        let service = service();
        let loan = service
            .create(apply(dec!(1000), dec!(5), 6), None)
            .await
            .unwrap();

        let loan = service.close(loan.id).await.unwrap();
        assert_eq!(loan.status, LoanStatus::Closed);

        let loan = service.close(loan.id).await.unwrap();
        assert_eq!(loan.status, LoanStatus::Closed);
    }

    #[tokio::test]
    async fn test_update_recomputes_only_before_repayment() {
        let service = service();
        let loan = service
            .create(apply(dec!(10000), dec!(10), 12), None)
            .await
            .unwrap();
        service.approve(loan.id).await.unwrap();

        // No repayment yet: balance follows the new total
        let loan = service
            .update(
                loan.id,
                UpdateLoanRequest {
                    loan_amount: Some(dec!(20000)),
                    interest_rate: None,
                    duration_months: None,
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(loan.total_repayable, dec!(22000));
        assert_eq!(loan.balance, dec!(22000));

        service
            .record_repayment(loan.id, LoanRepaymentRequest { amount: dec!(2000) })
            .await
            .unwrap();

        // After a repayment the stored balance is preserved verbatim
        let loan = service
            .update(
                loan.id,
                UpdateLoanRequest {
                    loan_amount: Some(dec!(30000)),
                    interest_rate: None,
                    duration_months: None,
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(loan.total_repayable, dec!(33000));
        assert_eq!(loan.balance, dec!(20000));
    }

    #[tokio::test]
    async fn test_delete_missing_loan() {
        let service = service();
        let result = service.delete(99).await;
        assert!(matches!(result, Err(LoanError::NotFound)));
    }

    #[tokio::test]
    async fn test_aggregates() {
        let service = service();
        let a = service.create(apply(dec!(10000), dec!(10), 12), None).await.unwrap();
        let b = service.create(apply(dec!(5000), dec!(0), 10), None).await.unwrap();

        service.approve(a.id).await.unwrap();
        service.disburse(a.id).await.unwrap();
        service.approve(b.id).await.unwrap();
        service.disburse(b.id).await.unwrap();
        service
            .record_repayment(b.id, LoanRepaymentRequest { amount: dec!(5000) })
            .await
            .unwrap();

        // Both reached disbursement; only `a` still carries a balance
        assert_eq!(service.total_disbursed().await.unwrap(), dec!(15000));
        assert_eq!(service.total_outstanding().await.unwrap(), dec!(11000));
        assert_eq!(service.outstanding_for_user(1).await.unwrap(), dec!(11000));
    }
}
