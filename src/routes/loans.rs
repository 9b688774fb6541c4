//! Loan route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/loans/me", get(handlers::get_my_loans))
        .route("/api/v1/loans/apply", post(handlers::apply_for_loan))
        .route("/api/v1/admin/loans", get(handlers::list_loans))
        .route("/api/v1/admin/loans", post(handlers::create_loan))
        .route("/api/v1/admin/loans/:id", get(handlers::get_loan))
        .route("/api/v1/admin/loans/:id", put(handlers::update_loan))
        .route("/api/v1/admin/loans/:id", delete(handlers::delete_loan))
        .route(
            "/api/v1/admin/loans/:id/approve",
            post(handlers::approve_loan),
        )
        .route(
            "/api/v1/admin/loans/:id/disburse",
            post(handlers::disburse_loan),
        )
        .route(
            "/api/v1/admin/loans/:id/repayments",
            post(handlers::record_loan_repayment),
        )
        .route("/api/v1/admin/loans/:id/close", post(handlers::close_loan))
        .route(
            "/api/v1/admin/loans/:id/reject",
            post(handlers::reject_loan),
        )
}
