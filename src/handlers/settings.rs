//! System settings HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::ApiResult;
use crate::middleware::AdminUser;
use crate::models::{SystemSetting, UpsertSettingRequest};
use crate::state::AppState;

/// GET /api/v1/admin/settings - List all settings
pub async fn list_settings(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<SystemSetting>>> {
    let settings = state.settings_service.list().await?;
    Ok(Json(settings))
}

/// GET /api/v1/admin/settings/:key
pub async fn get_setting(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(key): Path<String>,
) -> ApiResult<Json<SystemSetting>> {
    let setting = state.settings_service.get(&key).await?;
    Ok(Json(setting))
}

/// PUT /api/v1/admin/settings - Create or update a setting
pub async fn upsert_setting(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<UpsertSettingRequest>,
) -> ApiResult<Json<SystemSetting>> {
    let setting = state.settings_service.upsert(req).await?;
    Ok(Json(setting))
}
