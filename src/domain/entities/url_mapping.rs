//! URL mapping entity: the persisted association between a long URL and its short code.

use chrono::{DateTime, Utc};

/// A stored short code → long URL mapping.
///
/// Created once by the allocator. After creation only `total_visits` changes,
/// and only upward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    /// Store-assigned key; ascending in insertion order.
    pub id: i64,
    pub short_code: String,
    pub long_url: String,
    /// Verified identity of the creator (an email address).
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub total_visits: i64,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        short_code: String,
        long_url: String,
        owner: String,
        created_at: DateTime<Utc>,
        total_visits: i64,
    ) -> Self {
        Self {
            id,
            short_code,
            long_url,
            owner,
            created_at,
            total_visits,
        }
    }
}

/// Input data for inserting a new mapping.
///
/// `created_at` is fixed by the caller at allocation time; `total_visits` always starts at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub short_code: String,
    pub long_url: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl NewUrlMapping {
    pub fn new(short_code: String, long_url: String, owner: String) -> Self {
        Self {
            short_code,
            long_url,
            owner,
            created_at: Utc::now(),
        }
    }
}

/// Aggregate figures over the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub mappings: i64,
    pub total_visits: i64,
}
