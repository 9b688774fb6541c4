//! Payment ledger route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/payments/me", get(handlers::get_my_payments))
        .route(
            "/api/v1/payments/me/summary",
            get(handlers::get_my_payment_summary),
        )
        .route("/api/v1/admin/payments", get(handlers::list_payments))
        .route("/api/v1/admin/payments", post(handlers::create_payment))
        .route("/api/v1/admin/payments/:id", get(handlers::get_payment))
        .route("/api/v1/admin/payments/:id", put(handlers::update_payment))
        .route(
            "/api/v1/admin/payments/:id",
            delete(handlers::delete_payment),
        )
}
