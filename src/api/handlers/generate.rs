//! Handler for short code generation.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::generate::{GenerateRequest, GenerateResponse};
use crate::application::services::{AllocationOutcome, Identity};
use crate::error::AppError;
use crate::state::AppState;

/// Returns a short code for a long URL, creating the mapping on first use.
///
/// # Endpoint
///
/// `POST /generate-shortCode` (Bearer token required)
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// - **201 Created** when a new mapping was stored
/// - **200 OK** when the URL was already mapped (the stored code is returned
///   and the caller does not become its owner)
///
/// ```json
/// { "shortCode": "k3x9q2ab", "message": "Short URL generated successfully" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `longUrl` is missing or empty.
/// Returns 500 Internal Server Error on exhausted retries or store failure.
pub async fn generate_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(payload): Json<GenerateRequest>,
) -> Result<(StatusCode, Json<GenerateResponse>), AppError> {
    payload.validate()?;

    let long_url = payload.long_url.unwrap_or_default();

    let allocation = state
        .allocation_service
        .allocate(&long_url, &identity.email)
        .await?;

    let status = match allocation.outcome {
        AllocationOutcome::Created => StatusCode::CREATED,
        AllocationOutcome::Existing => StatusCode::OK,
    };

    Ok((status, Json(GenerateResponse::new(allocation.short_code))))
}
