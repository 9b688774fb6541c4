//! System settings service
//!
//! Key/value store with upsert semantics. The active financial year is an
//! ordinary setting read through this service and passed into the
//! financial services by the handlers; there is no ambient global.

use thiserror::Error;

use crate::error::ApiError;
use crate::models::{SystemSetting, UpsertSettingRequest, CURRENT_FINANCIAL_YEAR_KEY};
use crate::repository::{RepositoryError, SettingsRepository};

/// Fallback financial-year label seeded by the migrations
const DEFAULT_FINANCIAL_YEAR: &str = "2024-2025";

/// Settings service errors
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Setting not found: {0}")]
    NotFound(String),

    #[error("Key cannot be empty")]
    EmptyKey,

    #[error("Value cannot be empty")]
    EmptyValue,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<SettingsError> for ApiError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SettingsError::EmptyKey | SettingsError::EmptyValue => {
                ApiError::ValidationError(err.to_string())
            }
            SettingsError::Repository(e) => ApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Configuration store service
pub struct SettingsService<R> {
    settings: R,
}

impl<R: SettingsRepository> SettingsService<R> {
    pub fn new(settings: R) -> Self {
        Self { settings }
    }

    pub async fn get(&self, key: &str) -> Result<SystemSetting, SettingsError> {
        self.settings
            .get_by_key(key)
            .await?
            .ok_or_else(|| SettingsError::NotFound(key.to_string()))
    }

    /// Create or update a setting by key
    pub async fn upsert(&self, request: UpsertSettingRequest) -> Result<SystemSetting, SettingsError> {
        if request.key.is_empty() {
            return Err(SettingsError::EmptyKey);
        }
        if request.value.is_empty() {
            return Err(SettingsError::EmptyValue);
        }

        Ok(self
            .settings
            .upsert(&request.key, &request.value, request.description.as_deref())
            .await?)
    }

    pub async fn list(&self) -> Result<Vec<SystemSetting>, SettingsError> {
        Ok(self.settings.list().await?)
    }

    /// The active financial-year label ("YYYY-YYYY"); falls back to the
    /// migration-seeded default when the row is missing.
    pub async fn current_financial_year(&self) -> Result<String, SettingsError> {
        let setting = self.settings.get_by_key(CURRENT_FINANCIAL_YEAR_KEY).await?;
        Ok(setting
            .map(|s| s.value)
            .unwrap_or_else(|| DEFAULT_FINANCIAL_YEAR.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemorySettingsRepository;

    fn service() -> SettingsService<MemorySettingsRepository> {
        SettingsService::new(MemorySettingsRepository::new())
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let service = service();
        let setting = service
            .upsert(UpsertSettingRequest {
                key: "current_financial_year".to_string(),
                value: "2024-2025".to_string(),
                description: Some("Current active financial year".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(setting.value, "2024-2025");

        let setting = service
            .upsert(UpsertSettingRequest {
                key: "current_financial_year".to_string(),
                value: "2025-2026".to_string(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(setting.value, "2025-2026");
        assert_eq!(
            setting.description.as_deref(),
            Some("Current active financial year")
        );

        // Still a single row
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_key_or_value_rejected() {
        let service = service();
        assert!(matches!(
            service
                .upsert(UpsertSettingRequest {
                    key: String::new(),
                    value: "x".to_string(),
                    description: None,
                })
                .await,
            Err(SettingsError::EmptyKey)
        ));
        assert!(matches!(
            service
                .upsert(UpsertSettingRequest {
                    key: "x".to_string(),
                    value: String::new(),
                    description: None,
                })
                .await,
            Err(SettingsError::EmptyValue)
        ));
    }

    #[tokio::test]
    async fn test_financial_year_falls_back_to_default() {
        let service = service();
        assert_eq!(service.current_financial_year().await.unwrap(), "2024-2025");

        service
            .upsert(UpsertSettingRequest {
                key: "current_financial_year".to_string(),
                value: "2025-2026".to_string(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(service.current_financial_year().await.unwrap(), "2025-2026");
    }
}
