//! Short identifier allocation

use uuid::Uuid;

/// Fixed length of every allocated short id.
pub const SHORT_ID_LEN: usize = 8;

/// Allocates short identifiers by truncating a UUIDv4's hex form.
///
/// Collisions are statistically unlikely but possible; the allocator makes
/// no uniqueness guarantee on its own. Uniqueness is enforced by the
/// storage layer's primary-key constraint, with the shortener service
/// retrying allocation on conflict.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdAllocator;

impl IdAllocator {
    pub fn allocate(&self) -> String {
        Uuid::new_v4().simple().to_string()[..SHORT_ID_LEN].to_string()
    }
}
