//! Handler for short URL redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::location::encode_location;

/// Page shown for unknown short codes.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    short_code: String,
    home_url: Option<String>,
}

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{shortCode}`
///
/// # Request Flow
///
/// 1. Look the code up in the store
/// 2. Increment its visit counter
/// 3. Return 307 Temporary Redirect with `Location: <longUrl>`, percent-encoding
///    any bytes a header cannot carry
///
/// The code is not format-checked; anything that is not stored is simply absent.
///
/// # Errors
///
/// Returns a 404 HTML page if the short code doesn't exist.
/// Returns 500 Internal Server Error on store failure.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = match state.resolution_service.resolve(&short_code).await {
        Ok(url) => url,
        Err(AppError::NotFound { .. }) => {
            debug!(%short_code, "Unknown short code");
            let page = NotFoundTemplate {
                short_code,
                home_url: state.client_domain.clone(),
            };
            return Ok((StatusCode::NOT_FOUND, page).into_response());
        }
        Err(e) => return Err(e),
    };

    let location = HeaderValue::from_str(&encode_location(&long_url)).map_err(|_| {
        AppError::internal(
            "Stored URL cannot be used as a redirect target",
            json!({ "shortCode": short_code }),
        )
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
