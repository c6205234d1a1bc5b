//! Authenticated route configuration.
//!
//! All routes here require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{all_urls_handler, generate_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes that act on behalf of the authenticated caller.
///
/// # Endpoints
///
/// - `POST /generate-shortCode` - Allocate (or reuse) a short code for a long URL
/// - `GET  /all-urls`           - List the caller's mappings
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-shortCode", post(generate_handler))
        .route("/all-urls", get(all_urls_handler))
}
