//! Authentication route definitions

use axum::{routing::post, Router};

use crate::handlers;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/login", post(handlers::login))
        .route(
            "/api/v1/auth/change-password",
            post(handlers::change_password),
        )
}
