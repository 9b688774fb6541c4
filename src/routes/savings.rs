//! Savings route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn savings_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/savings/me", get(handlers::get_my_savings))
        .route("/api/v1/admin/savings", get(handlers::list_savings))
        .route("/api/v1/admin/savings", post(handlers::create_savings))
        .route("/api/v1/admin/savings/:id", get(handlers::get_savings))
        .route("/api/v1/admin/savings/:id", put(handlers::update_savings))
        .route("/api/v1/admin/savings/:id", delete(handlers::delete_savings))
        .route(
            "/api/v1/admin/savings/:id/payments",
            post(handlers::record_savings_payment),
        )
}
