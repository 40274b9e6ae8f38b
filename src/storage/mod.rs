//! Mapping persistence
//!
//! The persistence contract is a small key-value interface over
//! `short_id → target_url`. The sea-orm backend is the production store;
//! [`memory::MemoryStore`] backs the test suite.

pub mod backend;
pub mod memory;
mod models;

pub use models::UrlMapping;

use crate::errors::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MappingStore: Send + Sync {
    /// Insert a new mapping. Fails with `ShortgateError::Conflict` when the
    /// short id already exists; the uniqueness check is the storage layer's,
    /// never a caller-side pre-read.
    async fn put(&self, mapping: &UrlMapping) -> Result<()>;

    /// Look up a mapping by short id.
    async fn get(&self, short_id: &str) -> Result<Option<UrlMapping>>;

    fn backend_name(&self) -> &str;
}
