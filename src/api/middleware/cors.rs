//! Cross-origin policy for the browser front-end.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Creates the CORS layer.
///
/// When `client_domain` is a valid origin, requests from it are allowed with
/// credentials for `GET`/`POST` and the `Authorization`/`Content-Type`
/// headers. Otherwise no cross-origin access is granted.
pub fn layer(client_domain: Option<&str>) -> CorsLayer {
    let Some(origin) = client_domain.and_then(|d| HeaderValue::from_str(d).ok()) else {
        return CorsLayer::new();
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
