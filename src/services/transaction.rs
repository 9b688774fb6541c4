//! Ledger transaction service
//!
//! Classifies each movement as a credit or debit from the fixed type
//! table. A running balance is deliberately not computed anywhere; the
//! `balance` column persists as stored.

use chrono::Utc;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{
    CreateTransactionRequest, NewTransaction, Page, Transaction, TransactionType,
    UpdateTransactionRequest,
};
use crate::repository::{RepositoryError, TransactionRepository};

/// Transaction service errors
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Transaction not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound => ApiError::NotFound(err.to_string()),
            TransactionError::Repository(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Money-movement ledger service
pub struct TransactionService<R> {
    transactions: R,
}

impl<R: TransactionRepository> TransactionService<R> {
    pub fn new(transactions: R) -> Self {
        Self { transactions }
    }

    /// Record a movement, split into debit/credit by type
    pub async fn create(
        &self,
        request: CreateTransactionRequest,
        financial_year: Option<String>,
    ) -> Result<Transaction, TransactionError> {
        let (debit, credit) = request.transaction_type.classify(request.amount);

        let transaction = self
            .transactions
            .create(NewTransaction {
                user_id: request.user_id,
                transaction_type: request.transaction_type,
                description: request.description.unwrap_or_default(),
                debit,
                credit,
                reference_id: request.reference_id,
                transaction_date: request.transaction_date.unwrap_or_else(Utc::now),
                financial_year,
            })
            .await?;

        Ok(transaction)
    }

    /// Correct a transaction; a changed amount or type re-evaluates the
    /// debit/credit split against the effective type.
    pub async fn update(
        &self,
        transaction_id: i64,
        request: UpdateTransactionRequest,
    ) -> Result<Transaction, TransactionError> {
        let mut transaction = self.get(transaction_id).await?;

        if let Some(transaction_type) = request.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(description) = request.description {
            transaction.description = description;
        }
        if let Some(transaction_date) = request.transaction_date {
            transaction.transaction_date = transaction_date;
        }
        if let Some(amount) = request.amount {
            let (debit, credit) = transaction.transaction_type.classify(amount);
            transaction.debit = debit;
            transaction.credit = credit;
        } else if request.transaction_type.is_some() {
            let amount = transaction.debit + transaction.credit;
            let (debit, credit) = transaction.transaction_type.classify(amount);
            transaction.debit = debit;
            transaction.credit = credit;
        }

        Ok(self.transactions.update(&transaction).await?)
    }

    pub async fn delete(&self, transaction_id: i64) -> Result<(), TransactionError> {
        if !self.transactions.delete(transaction_id).await? {
            return Err(TransactionError::NotFound);
        }
        Ok(())
    }

    pub async fn get(&self, transaction_id: i64) -> Result<Transaction, TransactionError> {
        self.transactions
            .get_by_id(transaction_id)
            .await?
            .ok_or(TransactionError::NotFound)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self.transactions.list(page).await?)
    }

    pub async fn list_for_user(
        &self,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self.transactions.list_by_user(user_id, page).await?)
    }

    pub async fn list_by_type(
        &self,
        transaction_type: TransactionType,
        page: Page,
    ) -> Result<Vec<Transaction>, TransactionError> {
        Ok(self.transactions.list_by_type(transaction_type, page).await?)
    }
}
