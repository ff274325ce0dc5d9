pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis;
use crate::auth;
use crate::dashboard;
use crate::state::AppState;
use crate::upload;
use crate::upload::handlers::MAX_UPLOAD_BYTES;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/upload", post(upload::handlers::handle_upload))
        .route("/api/analyze", post(analysis::handlers::handle_analyze))
        .route("/api/dashboard", get(dashboard::handlers::handle_dashboard))
        .route("/api/auth/login", post(auth::handlers::handle_login))
        // Raised above the upload cap so the handler's own size check
        // answers with 400 instead of the framework's 413.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}
