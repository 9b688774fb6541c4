//! Admin user-management HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use validator::Validate;

use crate::error::ApiResult;
use crate::middleware::AdminUser;
use crate::models::{Page, UserResponse};
use crate::services::user::{CreateUserRequest, UpdateUserRequest};
use crate::state::AppState;

/// Admin dashboard analytics, aggregated fresh per request
#[derive(Debug, serde::Serialize)]
pub struct AdminDashboard {
    pub total_members: i64,
    pub total_savings: Decimal,
    pub total_share_value: Decimal,
    pub total_loans_disbursed: Decimal,
    pub outstanding_balances: Decimal,
}

/// GET /api/v1/admin/dashboard - Association-wide totals
pub async fn get_admin_dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<AdminDashboard>> {
    let dashboard = AdminDashboard {
        total_members: state.user_service.count().await?,
        total_savings: state.savings_service.total_paid_all().await?,
        total_share_value: state.share_service.total_value_all().await?,
        total_loans_disbursed: state.loan_service.total_disbursed().await?,
        outstanding_balances: state.loan_service.total_outstanding().await?,
    };

    Ok(Json(dashboard))
}

/// GET /api/v1/admin/users - List all members
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.list(page).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/admin/users - Register a member
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    req.validate()?;

    let user = state.user_service.create(req).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/admin/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.get(user_id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/admin/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.update(user_id, req).await?;
    Ok(Json(user.into()))
}

/// POST /api/v1/admin/users/:id/suspend
pub async fn suspend_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.suspend(user_id).await?;
    Ok(Json(user.into()))
}

/// POST /api/v1/admin/users/:id/activate
pub async fn activate_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.user_service.activate(user_id).await?;
    Ok(Json(user.into()))
}

/// Request body for an admin password reset
#[derive(Debug, serde::Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// POST /api/v1/admin/users/:id/reset-password
pub async fn reset_user_password(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<Json<UserResponse>> {
    req.validate()?;

    let user = state
        .auth_service
        .reset_password(user_id, &req.new_password)
        .await?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/admin/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.user_service.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
