//! In-memory implementation of the mapping store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use super::SHORT_CODE_CONSTRAINT;
use crate::domain::entities::{NewUrlMapping, StoreSummary, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::StoreError;

/// Process-local mapping store backed by [`DashMap`].
///
/// Inserts go through the map's entry API, so two writers racing on the same
/// short code cannot both succeed. Increments mutate the record under its
/// shard lock. The long URL index always points at the lowest `id` stored for
/// that URL, whichever insert reaches it first. Contents are lost when the
/// process exits.
#[derive(Default)]
pub struct MemoryUrlMappingRepository {
    by_code: DashMap<String, UrlMapping>,
    /// long URL → (`id`, short code) of the oldest mapping stored for it
    by_long_url: DashMap<String, (i64, String)>,
    last_id: AtomicI64,
}

impl MemoryUrlMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[async_trait]
impl UrlMappingRepository for MemoryUrlMappingRepository {
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let Some(short_code) = self.by_long_url.get(long_url).map(|e| e.value().1.clone()) else {
            return Ok(None);
        };

        Ok(self.by_code.get(&short_code).map(|m| m.value().clone()))
    }

    async fn find_by_short_code(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, StoreError> {
        Ok(self.by_code.get(short_code).map(|m| m.value().clone()))
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, StoreError> {
        let mapping = match self.by_code.entry(new_mapping.short_code.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::DuplicateKey(SHORT_CODE_CONSTRAINT.to_string()));
            }
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;
                let mapping = UrlMapping::new(
                    id,
                    new_mapping.short_code,
                    new_mapping.long_url,
                    new_mapping.owner,
                    new_mapping.created_at,
                    0,
                );
                slot.insert(mapping.clone());
                mapping
            }
        };

        self.by_long_url
            .entry(mapping.long_url.clone())
            .and_modify(|oldest| {
                if mapping.id < oldest.0 {
                    *oldest = (mapping.id, mapping.short_code.clone());
                }
            })
            .or_insert_with(|| (mapping.id, mapping.short_code.clone()));

        Ok(mapping)
    }

    async fn increment_visits(&self, short_code: &str) -> Result<(), StoreError> {
        match self.by_code.get_mut(short_code) {
            Some(mut mapping) => {
                mapping.total_visits += 1;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<UrlMapping>, StoreError> {
        let mut mappings: Vec<UrlMapping> = self
            .by_code
            .iter()
            .filter(|m| m.owner == owner)
            .map(|m| m.value().clone())
            .collect();

        mappings.sort_by_key(|m| m.id);

        Ok(mappings)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn summary(&self) -> Result<StoreSummary, StoreError> {
        Ok(self
            .by_code
            .iter()
            .fold(StoreSummary::default(), |acc, m| StoreSummary {
                mappings: acc.mappings + 1,
                total_visits: acc.total_visits + m.total_visits,
            }))
    }
}
