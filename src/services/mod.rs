pub mod allocator;
pub mod shortener;

pub use allocator::IdAllocator;
pub use shortener::ShortenerService;
