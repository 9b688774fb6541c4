//! Loan HTTP handlers
//!
//! Members apply for and view their own loans; the lifecycle operations
//! (approve, disburse, repay, close, reject) are admin-guarded.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use validator::Validate;

use crate::error::ApiResult;
use crate::middleware::{AdminUser, AuthenticatedUser};
use crate::models::{
    CreateLoanRequest, Loan, LoanRepaymentRequest, Page, UpdateLoanRequest,
};
use crate::state::AppState;

/// Loan terms submitted by a member; the applicant is the caller
#[derive(Debug, serde::Deserialize)]
pub struct LoanApplicationRequest {
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub duration_months: i32,
    pub description: Option<String>,
}

/// GET /api/v1/loans/me - Current member's loans
pub async fn get_my_loans(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Loan>>> {
    let loans = state.loan_service.list_for_user(user.user_id, page).await?;
    Ok(Json(loans))
}

/// POST /api/v1/loans/apply - Apply for a loan as the current member
pub async fn apply_for_loan(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<LoanApplicationRequest>,
) -> ApiResult<(StatusCode, Json<Loan>)> {
    let financial_year = state.settings_service.current_financial_year().await?;

    let request = CreateLoanRequest {
        user_id: user.user_id,
        loan_amount: req.loan_amount,
        interest_rate: req.interest_rate,
        duration_months: req.duration_months,
        description: req.description,
    };
    request.validate()?;

    let loan = state.loan_service.create(request, Some(financial_year)).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// GET /api/v1/admin/loans - List all loans
pub async fn list_loans(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(page): Query<Page>,
) -> ApiResult<Json<Vec<Loan>>> {
    let loans = state.loan_service.list(page).await?;
    Ok(Json(loans))
}

/// GET /api/v1/admin/loans/:id
pub async fn get_loan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(loan_id): Path<i64>,
) -> ApiResult<Json<Loan>> {
    let loan = state.loan_service.get(loan_id).await?;
    Ok(Json(loan))
}

/// POST /api/v1/admin/loans - Create a loan for a member
pub async fn create_loan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateLoanRequest>,
) -> ApiResult<(StatusCode, Json<Loan>)> {
    req.validate()?;

    let financial_year = state.settings_service.current_financial_year().await?;
    let loan = state.loan_service.create(req, Some(financial_year)).await?;
    Ok((StatusCode::CREATED, Json(loan)))
}

/// PUT /api/v1/admin/loans/:id - Edit loan terms
pub async fn update_loan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(loan_id): Path<i64>,
    Json(req): Json<UpdateLoanRequest>,
) -> ApiResult<Json<Loan>> {
    let loan = state.loan_service.update(loan_id, req).await?;
    Ok(Json(loan))
}

/// POST /api/v1/admin/loans/:id/approve
pub async fn approve_loan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(loan_id): Path<i64>,
) -> ApiResult<Json<Loan>> {
    let loan = state.loan_service.approve(loan_id).await?;
    Ok(Json(loan))
}

/// POST /api/v1/admin/loans/:id/disburse
pub async fn disburse_loan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(loan_id): Path<i64>,
) -> ApiResult<Json<Loan>> {
    let loan = state.loan_service.disburse(loan_id).await?;
    Ok(Json(loan))
}

/// POST /api/v1/admin/loans/:id/repayments - Record a repayment
pub async fn record_loan_repayment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(loan_id): Path<i64>,
    Json(req): Json<LoanRepaymentRequest>,
) -> ApiResult<Json<Loan>> {
    let loan = state.loan_service.record_repayment(loan_id, req).await?;
    Ok(Json(loan))
}

/// POST /api/v1/admin/loans/:id/close
pub async fn close_loan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(loan_id): Path<i64>,
) -> ApiResult<Json<Loan>> {
    let loan = state.loan_service.close(loan_id).await?;
    Ok(Json(loan))
}

/// POST /api/v1/admin/loans/:id/reject
pub async fn reject_loan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(loan_id): Path<i64>,
) -> ApiResult<Json<Loan>> {
    let loan = state.loan_service.reject(loan_id).await?;
    Ok(Json(loan))
}

/// DELETE /api/v1/admin/loans/:id
pub async fn delete_loan(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(loan_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.loan_service.delete(loan_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
