//! Handler for listing the caller's mappings.

use axum::{Extension, Json, extract::State};

use crate::api::dto::url_mapping::UrlMappingResponse;
use crate::application::services::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every mapping created by the authenticated caller.
///
/// # Endpoint
///
/// `GET /all-urls` (Bearer token required)
///
/// # Response
///
/// A JSON array in creation order; empty when the caller owns nothing.
///
/// ```json
/// [
///   {
///     "id": 1,
///     "shortCode": "k3x9q2ab",
///     "longUrl": "https://example.com",
///     "owner": "user@example.com",
///     "createdAt": "2025-01-01T12:00:00Z",
///     "totalVisits": 42
///   }
/// ]
/// ```
pub async fn all_urls_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<UrlMappingResponse>>, AppError> {
    let mappings = state
        .allocation_service
        .list_owned(&identity.email)
        .await?;

    Ok(Json(mappings.into_iter().map(Into::into).collect()))
}
