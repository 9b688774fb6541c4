//! Authentication HTTP handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::service::{ChangePasswordRequest, LoginRequest, TokenResponse};
use crate::error::ApiResult;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;

/// POST /api/v1/auth/login - Authenticate by email or member id
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    req.validate()?;

    let tokens = state.auth_service.login(req).await?;
    Ok(Json(tokens))
}

/// Confirmation message body
#[derive(Debug, serde::Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/v1/auth/change-password - Change the caller's own password
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    state.auth_service.change_password(user.user_id, req).await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}
