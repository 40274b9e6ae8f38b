//! In-memory mapping store
//!
//! `DashMap`-backed implementation used by the test suite. Duplicate
//! detection goes through the entry API so concurrent puts of the same id
//! cannot both succeed.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{MappingStore, UrlMapping};
use crate::errors::{Result, ShortgateError};
use async_trait::async_trait;

#[derive(Default)]
pub struct MemoryStore {
    mappings: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[async_trait]
impl MappingStore for MemoryStore {
    async fn put(&self, mapping: &UrlMapping) -> Result<()> {
        match self.mappings.entry(mapping.short_id.clone()) {
            Entry::Occupied(_) => Err(ShortgateError::conflict(format!(
                "short id already exists: {}",
                mapping.short_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(mapping.url.clone());
                Ok(())
            }
        }
    }

    async fn get(&self, short_id: &str) -> Result<Option<UrlMapping>> {
        Ok(self.mappings.get(short_id).map(|entry| UrlMapping {
            short_id: short_id.to_string(),
            url: entry.value().clone(),
        }))
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(id: &str, url: &str) -> UrlMapping {
        UrlMapping {
            short_id: id.to_string(),
            url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryStore::new();
        store
            .put(&mapping("a1b2c3d4", "https://example.com"))
            .await
            .unwrap();

        let found = store.get("a1b2c3d4").await.unwrap().unwrap();
        assert_eq!(found.url, "https://example.com");
    }

    #[tokio::test]
    async fn duplicate_put_is_a_conflict() {
        let store = MemoryStore::new();
        store.put(&mapping("a1b2c3d4", "https://one")).await.unwrap();

        let err = store
            .put(&mapping("a1b2c3d4", "https://two"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShortgateError::Conflict(_)));

        // The original mapping is untouched
        let found = store.get("a1b2c3d4").await.unwrap().unwrap();
        assert_eq!(found.url, "https://one");
    }

    #[tokio::test]
    async fn missing_id_is_none_not_an_error() {
        let store = MemoryStore::new();
        assert!(store.get("zzzzzzzz").await.unwrap().is_none());
    }
}
