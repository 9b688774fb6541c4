//! Share route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/shares/me", get(handlers::get_my_shares))
        .route("/api/v1/admin/shares", get(handlers::list_shares))
        .route("/api/v1/admin/shares", post(handlers::create_share))
        .route("/api/v1/admin/shares/:id", get(handlers::get_share))
        .route("/api/v1/admin/shares/:id", put(handlers::update_share))
        .route("/api/v1/admin/shares/:id", delete(handlers::delete_share))
}
