//! Share HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::ApiResult;
use crate::middleware::{AdminUser, AuthenticatedUser};
use crate::models::{CreateShareRequest, Page, Share, UpdateShareRequest};
use crate::state::AppState;

/// GET /api/v1/shares/me - Current member's share holdings
pub async fn get_my_shares(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Share>>> {
    let shares = state.share_service.list_for_user(user.user_id, page).await?;
    Ok(Json(shares))
}

/// GET /api/v1/admin/shares - List all share records
pub async fn list_shares(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Share>>> {
    let shares = state.share_service.list(page).await?;
    Ok(Json(shares))
}

/// GET /api/v1/admin/shares/:id
pub async fn get_share(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(share_id): Path<i64>,
) -> ApiResult<Json<Share>> {
    let share = state.share_service.get(share_id).await?;
    Ok(Json(share))
}

/// POST /api/v1/admin/shares - Record a share purchase
pub async fn create_share(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateShareRequest>,
) -> ApiResult<(StatusCode, Json<Share>)> {
    let financial_year = state.settings_service.current_financial_year().await?;
    let share = state.share_service.create(req, Some(financial_year)).await?;
    Ok((StatusCode::CREATED, Json(share)))
}

/// PUT /api/v1/admin/shares/:id - Edit a share holding
pub async fn update_share(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(share_id): Path<i64>,
    Json(req): Json<UpdateShareRequest>,
) -> ApiResult<Json<Share>> {
    let share = state.share_service.update(share_id, req).await?;
    Ok(Json(share))
}

/// DELETE /api/v1/admin/shares/:id
pub async fn delete_share(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(share_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.share_service.delete(share_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
