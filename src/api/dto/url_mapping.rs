//! DTOs for listing a caller's mappings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlMapping;

/// A stored mapping as returned by `GET /all-urls`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMappingResponse {
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub total_visits: i64,
}

impl From<UrlMapping> for UrlMappingResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            id: mapping.id,
            short_code: mapping.short_code,
            long_url: mapping.long_url,
            owner: mapping.owner,
            created_at: mapping.created_at,
            total_visits: mapping.total_visits,
        }
    }
}
