//! System settings key/value store

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};

/// Settings key holding the active financial year label ("YYYY-YYYY")
pub const CURRENT_FINANCIAL_YEAR_KEY: &str = "current_financial_year";

/// A single configuration entry
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct SystemSetting {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create or update a setting (upsert by key)
#[derive(Debug, Deserialize)]
pub struct UpsertSettingRequest {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}
