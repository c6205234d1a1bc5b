#![allow(dead_code)]

use axum::routing::get;
use axum::{Router, middleware};
use chrono::Duration;
use sqlx::PgPool;
use std::sync::Arc;
use shortcode_service::api;
use shortcode_service::api::handlers::{health_handler, index_handler, redirect_handler};
use shortcode_service::api::middleware::auth;
use shortcode_service::application::services::AuthService;
use shortcode_service::application::services::auth_service::issue_token;
use shortcode_service::infrastructure::persistence::MemoryUrlMappingRepository;
use shortcode_service::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";

pub fn create_test_state() -> (AppState, Arc<MemoryUrlMappingRepository>) {
    let repository = Arc::new(MemoryUrlMappingRepository::new());
    let state = AppState::new(
        repository.clone(),
        AuthService::from_secret(TEST_SECRET),
        Some("https://app.example.com".to_string()),
    );

    (state, repository)
}

/// Full route table with authentication, without path normalization.
pub fn create_test_app(state: AppState) -> Router {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
        .merge(protected)
        .with_state(state)
}

pub fn token_for(email: &str) -> String {
    issue_token(TEST_SECRET, email, Duration::hours(1), None, None).unwrap()
}

pub async fn create_test_mapping(pool: &PgPool, code: &str, url: &str, owner: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO url_mappings (short_code, long_url, owner) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(code)
    .bind(url)
    .bind(owner)
    .fetch_one(pool)
    .await
    .unwrap()
}
