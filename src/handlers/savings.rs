//! Savings HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::ApiResult;
use crate::middleware::{AdminUser, AuthenticatedUser};
use crate::models::{
    CreateSavingsRequest, Page, Savings, SavingsPaymentRequest, UpdateSavingsRequest,
};
use crate::state::AppState;

/// GET /api/v1/savings/me - Current member's savings periods
pub async fn get_my_savings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Savings>>> {
    let savings = state
        .savings_service
        .list_for_user(user.user_id, page)
        .await?;
    Ok(Json(savings))
}

/// GET /api/v1/admin/savings - List all savings records
pub async fn list_savings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Savings>>> {
    let savings = state.savings_service.list(page).await?;
    Ok(Json(savings))
}

/// GET /api/v1/admin/savings/:id
pub async fn get_savings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(savings_id): Path<i64>,
) -> ApiResult<Json<Savings>> {
    let savings = state.savings_service.get(savings_id).await?;
    Ok(Json(savings))
}

/// POST /api/v1/admin/savings - Open a savings period for a member
pub async fn create_savings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateSavingsRequest>,
) -> ApiResult<(StatusCode, Json<Savings>)> {
    let financial_year = state.settings_service.current_financial_year().await?;
    let savings = state
        .savings_service
        .create(req, Some(financial_year))
        .await?;
    Ok((StatusCode::CREATED, Json(savings)))
}

/// POST /api/v1/admin/savings/:id/payments - Record a payment
pub async fn record_savings_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(savings_id): Path<i64>,
    Json(req): Json<SavingsPaymentRequest>,
) -> ApiResult<Json<Savings>> {
    let savings = state
        .savings_service
        .record_payment(savings_id, req)
        .await?;
    Ok(Json(savings))
}

/// PUT /api/v1/admin/savings/:id - Overwrite amounts
pub async fn update_savings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(savings_id): Path<i64>,
    Json(req): Json<UpdateSavingsRequest>,
) -> ApiResult<Json<Savings>> {
    let savings = state.savings_service.update(savings_id, req).await?;
    Ok(Json(savings))
}

/// DELETE /api/v1/admin/savings/:id
pub async fn delete_savings(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(savings_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.savings_service.delete(savings_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
