//! Transaction ledger HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::ApiResult;
use crate::middleware::{AdminUser, AuthenticatedUser};
use crate::models::{CreateTransactionRequest, Page, Transaction, UpdateTransactionRequest};
use crate::state::AppState;

/// GET /api/v1/transactions/me - Current member's ledger entries
pub async fn get_my_transactions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .list_for_user(user.user_id, page)
        .await?;
    Ok(Json(transactions))
}

/// GET /api/v1/admin/transactions - List all ledger entries
pub async fn list_transactions(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state.transaction_service.list(page).await?;
    Ok(Json(transactions))
}

/// GET /api/v1/admin/transactions/:id
pub async fn get_transaction(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(transaction_id): Path<i64>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state.transaction_service.get(transaction_id).await?;
    Ok(Json(transaction))
}

/// POST /api/v1/admin/transactions - Record a money movement
pub async fn create_transaction(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let financial_year = state.settings_service.current_financial_year().await?;
    let transaction = state
        .transaction_service
        .create(req, Some(financial_year))
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// PUT /api/v1/admin/transactions/:id - Correct a ledger entry
pub async fn update_transaction(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(transaction_id): Path<i64>,
    Json(req): Json<UpdateTransactionRequest>,
) -> ApiResult<Json<Transaction>> {
    let transaction = state
        .transaction_service
        .update(transaction_id, req)
        .await?;
    Ok(Json(transaction))
}

/// DELETE /api/v1/admin/transactions/:id
pub async fn delete_transaction(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(transaction_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.transaction_service.delete(transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
