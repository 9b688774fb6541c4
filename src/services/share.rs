//! Share holdings service

use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{CreateShareRequest, NewShare, Page, Share, UpdateShareRequest};
use crate::repository::{RepositoryError, ShareRepository};

use chrono::Utc;

/// Share service errors
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Share record not found")]
    NotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ShareError> for ApiError {
    fn from(err: ShareError) -> Self {
        match err {
            ShareError::NotFound => ApiError::NotFound(err.to_string()),
            ShareError::Repository(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Share purchase and valuation service
pub struct ShareService<R> {
    shares: R,
}

impl<R: ShareRepository> ShareService<R> {
    pub fn new(shares: R) -> Self {
        Self { shares }
    }

    /// Record a share purchase with its derived total value
    pub async fn create(
        &self,
        request: CreateShareRequest,
        financial_year: Option<String>,
    ) -> Result<Share, ShareError> {
        let total_value = Share::total_value_for(request.shares_count, request.share_value);

        let share = self
            .shares
            .create(NewShare {
                user_id: request.user_id,
                shares_count: request.shares_count,
                share_value: request.share_value,
                total_value,
                purchase_date: request.purchase_date.unwrap_or_else(Utc::now),
                financial_year,
            })
            .await?;

        Ok(share)
    }

    /// Overwrite count and/or unit value; the total is always recomputed.
    /// No history of prior values is kept.
    pub async fn update(
        &self,
        share_id: i64,
        request: UpdateShareRequest,
    ) -> Result<Share, ShareError> {
        let mut share = self.get(share_id).await?;

        if let Some(shares_count) = request.shares_count {
            share.shares_count = shares_count;
        }
        if let Some(share_value) = request.share_value {
            share.share_value = share_value;
        }

        share.recalculate();
        Ok(self.shares.update(&share).await?)
    }

    pub async fn delete(&self, share_id: i64) -> Result<(), ShareError> {
        if !self.shares.delete(share_id).await? {
            return Err(ShareError::NotFound);
        }
        Ok(())
    }

    pub async fn get(&self, share_id: i64) -> Result<Share, ShareError> {
        self.shares
            .get_by_id(share_id)
            .await?
            .ok_or(ShareError::NotFound)
    }

    pub async fn list_for_user(&self, user_id: i64, page: Page) -> Result<Vec<Share>, ShareError> {
        Ok(self.shares.list_by_user(user_id, page).await?)
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Share>, ShareError> {
        Ok(self.shares.list(page).await?)
    }

    pub async fn total_shares_for_user(&self, user_id: i64) -> Result<i64, ShareError> {
        Ok(self.shares.total_shares_by_user(user_id).await?)
    }

    pub async fn total_value_for_user(&self, user_id: i64) -> Result<Decimal, ShareError> {
        Ok(self.shares.total_value_by_user(user_id).await?)
    }

    pub async fn total_value_all(&self) -> Result<Decimal, ShareError> {
        Ok(self.shares.total_value_all().await?)
    }
}
