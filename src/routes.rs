//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                    - Liveness greeting (public)
//! - `GET  /health`              - Health check with store ping (public)
//! - `GET  /{shortCode}`         - Short link redirect (public)
//! - `POST /generate-shortCode`  - Allocate a short code (Bearer token required)
//! - `GET  /all-urls`            - Caller's mappings (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Restricted to the configured client origin
//! - **Authentication** - Bearer token on protected routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, index_handler, redirect_handler};
use crate::api::middleware::{auth, cors, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The CORS origin is taken from `state.client_domain`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let cors = cors::layer(state.client_domain.as_deref());

    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
