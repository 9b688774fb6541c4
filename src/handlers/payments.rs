//! Payment ledger HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::ApiResult;
use crate::middleware::{AdminUser, AuthenticatedUser};
use crate::models::{
    CreateSavingsPaymentRequest, Page, PaymentSummary, SavingsPayment,
    UpdateSavingsPaymentRequest,
};
use crate::state::AppState;

/// GET /api/v1/payments/me - Current member's payment history
pub async fn get_my_payments(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<SavingsPayment>>> {
    let payments = state
        .payment_service
        .list_for_user(user.user_id, page)
        .await?;
    Ok(Json(payments))
}

/// GET /api/v1/payments/me/summary - Current member's totals
pub async fn get_my_payment_summary(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<PaymentSummary>> {
    let summary = state.payment_service.summary_for_user(user.user_id).await?;
    Ok(Json(summary))
}

/// GET /api/v1/admin/payments - List all payments
pub async fn list_payments(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<SavingsPayment>>> {
    let payments = state.payment_service.list(page).await?;
    Ok(Json(payments))
}

/// GET /api/v1/admin/payments/:id
pub async fn get_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(payment_id): Path<i64>,
) -> ApiResult<Json<SavingsPayment>> {
    let payment = state.payment_service.get(payment_id).await?;
    Ok(Json(payment))
}

/// POST /api/v1/admin/payments - Record a payment for a member
pub async fn create_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateSavingsPaymentRequest>,
) -> ApiResult<(StatusCode, Json<SavingsPayment>)> {
    let financial_year = state.settings_service.current_financial_year().await?;
    let payment = state
        .payment_service
        .create(req, Some(financial_year))
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// PUT /api/v1/admin/payments/:id - Correct a recorded payment
pub async fn update_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(payment_id): Path<i64>,
    Json(req): Json<UpdateSavingsPaymentRequest>,
) -> ApiResult<Json<SavingsPayment>> {
    let payment = state.payment_service.update(payment_id, req).await?;
    Ok(Json(payment))
}

/// DELETE /api/v1/admin/payments/:id
pub async fn delete_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(payment_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.payment_service.delete(payment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
