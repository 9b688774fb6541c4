//! System settings route definitions

use axum::{
    routing::{get, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/settings", get(handlers::list_settings))
        .route("/api/v1/admin/settings", put(handlers::upsert_setting))
        .route("/api/v1/admin/settings/:key", get(handlers::get_setting))
}
