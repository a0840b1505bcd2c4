//! HTTP REST API routes

mod translation_routes;

use axum::{routing::post, Router};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use translation_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/translation/project-start",
        post(translation_routes::start_project),
    )
}
