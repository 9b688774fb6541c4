//! Authentication middleware
//!
//! Extractors that verify the bearer token and expose the caller's
//! identity and role to handlers.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;

use crate::auth::verify_token;
use crate::config::Config;
use crate::models::UserRole;

/// Authenticated caller extracted from the JWT token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: UserRole,
}

/// Error response for authentication failures
#[derive(Debug, Serialize)]
struct AuthRejection {
    error: AuthRejectionDetails,
}

#[derive(Debug, Serialize)]
struct AuthRejectionDetails {
    code: String,
    message: String,
}

impl AuthRejection {
    fn new(code: &str, message: &str) -> Self {
        Self {
            error: AuthRejectionDetails {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }

    fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AuthRejection::new(
                        "MISSING_TOKEN",
                        "Authorization header with Bearer token required",
                    )
                    .into_response_with(StatusCode::UNAUTHORIZED)
                })?;

        let config = Arc::<Config>::from_ref(state);

        let claims = verify_token(bearer.token(), &config.jwt_secret).map_err(|e| {
            let (code, message) = match e.to_string().as_str() {
                s if s.contains("expired") => ("TOKEN_EXPIRED", "Token has expired"),
                _ => ("INVALID_TOKEN", "Invalid token"),
            };
            AuthRejection::new(code, message).into_response_with(StatusCode::UNAUTHORIZED)
        })?;

        let user_id = claims.sub.parse::<i64>().map_err(|_| {
            AuthRejection::new("INVALID_TOKEN", "Invalid user ID in token")
                .into_response_with(StatusCode::UNAUTHORIZED)
        })?;

        let role = match claims.role.as_str() {
            "admin" => UserRole::Admin,
            "member" => UserRole::Member,
            _ => {
                return Err(AuthRejection::new("INVALID_TOKEN", "Invalid role in token")
                    .into_response_with(StatusCode::UNAUTHORIZED))
            }
        };

        Ok(AuthenticatedUser { user_id, role })
    }
}

/// Extractor that additionally requires the admin role
pub struct AdminUser(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !matches!(user.role, UserRole::Admin) {
            return Err(AuthRejection::new(
                "FORBIDDEN",
                "Not enough permissions. Admin access required.",
            )
            .into_response_with(StatusCode::FORBIDDEN));
        }

        Ok(AdminUser(user))
    }
}
