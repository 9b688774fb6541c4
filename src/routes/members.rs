//! Member self-service route definitions

use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/members/me", get(handlers::get_my_profile))
        .route("/api/v1/members/me", put(handlers::update_my_profile))
        .route(
            "/api/v1/members/me/dashboard",
            get(handlers::get_my_dashboard),
        )
}
