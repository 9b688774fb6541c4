//! Transaction route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/transactions/me", get(handlers::get_my_transactions))
        .route(
            "/api/v1/admin/transactions",
            get(handlers::list_transactions),
        )
        .route(
            "/api/v1/admin/transactions",
            post(handlers::create_transaction),
        )
        .route(
            "/api/v1/admin/transactions/:id",
            get(handlers::get_transaction),
        )
        .route(
            "/api/v1/admin/transactions/:id",
            put(handlers::update_transaction),
        )
        .route(
            "/api/v1/admin/transactions/:id",
            delete(handlers::delete_transaction),
        )
}
