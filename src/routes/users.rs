//! Admin user-management route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/dashboard", get(handlers::get_admin_dashboard))
        .route("/api/v1/admin/users", get(handlers::list_users))
        .route("/api/v1/admin/users", post(handlers::create_user))
        .route("/api/v1/admin/users/:id", get(handlers::get_user))
        .route("/api/v1/admin/users/:id", put(handlers::update_user))
        .route("/api/v1/admin/users/:id", delete(handlers::delete_user))
        .route(
            "/api/v1/admin/users/:id/suspend",
            post(handlers::suspend_user),
        )
        .route(
            "/api/v1/admin/users/:id/activate",
            post(handlers::activate_user),
        )
        .route(
            "/api/v1/admin/users/:id/reset-password",
            post(handlers::reset_user_password),
        )
}
