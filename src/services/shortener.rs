//! Shortener service
//!
//! Composes the identifier allocator with the mapping store: allocate a
//! short id, persist the mapping, retry on collision.

use std::sync::Arc;

use tracing::{info, warn};

use super::IdAllocator;
use crate::errors::{Result, ShortgateError};
use crate::storage::{MappingStore, UrlMapping};

/// Upper bound on allocation attempts per shorten call.
const MAX_ALLOC_ATTEMPTS: u32 = 5;

pub struct ShortenerService {
    store: Arc<dyn MappingStore>,
    allocator: IdAllocator,
}

impl ShortenerService {
    pub fn new(store: Arc<dyn MappingStore>, allocator: IdAllocator) -> Self {
        Self { store, allocator }
    }

    /// Allocate a short id for `target_url` and persist the mapping.
    ///
    /// Identifier conflicts are recovered here by re-allocating; they never
    /// surface to the caller. Exhausting the retries is an internal fault,
    /// not a conflict.
    pub async fn create(&self, target_url: &str) -> Result<UrlMapping> {
        if target_url.trim().is_empty() {
            return Err(ShortgateError::validation("url must not be empty"));
        }

        for attempt in 1..=MAX_ALLOC_ATTEMPTS {
            let mapping = UrlMapping {
                short_id: self.allocator.allocate(),
                url: target_url.to_string(),
            };

            match self.store.put(&mapping).await {
                Ok(()) => {
                    info!(
                        "Mapping created: {} -> {} (attempt {})",
                        mapping.short_id, mapping.url, attempt
                    );
                    return Ok(mapping);
                }
                Err(ShortgateError::Conflict(_)) => {
                    warn!(
                        "Short id collision on attempt {}/{}, re-allocating",
                        attempt, MAX_ALLOC_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(ShortgateError::internal(format!(
            "exhausted {} short id allocation attempts",
            MAX_ALLOC_ATTEMPTS
        )))
    }

    /// Look up an existing mapping.
    pub async fn resolve(&self, short_id: &str) -> Result<UrlMapping> {
        self.store.get(short_id).await?.ok_or_else(|| {
            ShortgateError::not_found(format!("short id not found: {}", short_id))
        })
    }
}
