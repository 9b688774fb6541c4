//! Member self-service HTTP handlers

use axum::{extract::State, Json};
use rust_decimal::Decimal;

use crate::error::ApiResult;
use crate::middleware::AuthenticatedUser;
use crate::models::UserResponse;
use crate::services::user::UpdateUserRequest;
use crate::state::AppState;

/// GET /api/v1/members/me - Current member's profile
pub async fn get_my_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<UserResponse>> {
    let profile = state.user_service.get(user.user_id).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/v1/members/me - Update the current member's profile
pub async fn update_my_profile(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let profile = state.user_service.update(user.user_id, req).await?;
    Ok(Json(profile.into()))
}

/// Member dashboard summary, aggregated fresh per request
#[derive(Debug, serde::Serialize)]
pub struct MemberDashboard {
    pub total_savings_paid: Decimal,
    pub total_savings_expected: Decimal,
    pub total_shares: i64,
    pub total_share_value: Decimal,
    pub loan_balance: Decimal,
    pub total_payments: Decimal,
    pub payment_count: i64,
}

/// GET /api/v1/members/me/dashboard - Current member's financial summary
pub async fn get_my_dashboard(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<MemberDashboard>> {
    let user_id = user.user_id;

    let dashboard = MemberDashboard {
        total_savings_paid: state.savings_service.total_paid_for_user(user_id).await?,
        total_savings_expected: state
            .savings_service
            .total_expected_for_user(user_id)
            .await?,
        total_shares: state.share_service.total_shares_for_user(user_id).await?,
        total_share_value: state.share_service.total_value_for_user(user_id).await?,
        loan_balance: state.loan_service.outstanding_for_user(user_id).await?,
        total_payments: state.payment_service.total_paid_for_user(user_id).await?,
        payment_count: state.payment_service.count_for_user(user_id).await?,
    };

    Ok(Json(dashboard))
}
