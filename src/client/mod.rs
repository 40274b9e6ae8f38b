//! Outbound HTTP client for the storage node

mod storage_client;

pub use storage_client::{StorageClient, UpstreamResponse};
