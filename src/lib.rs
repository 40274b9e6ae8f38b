//! Shortgate - a minimal distributed URL shortener
//!
//! Two cooperating nodes built from one crate: a public **gateway** that
//! forwards shorten/resolve calls, and a **storage node** that allocates
//! short identifiers and persists the mapping. Every handler on both nodes
//! runs inside the same instrumentation chain (request timing, request
//! counting, trace context propagation).
//!
//! # Architecture
//! - `api`: HTTP services and middleware
//! - `client`: outbound client for the gateway → storage hop
//! - `config`: environment-driven configuration
//! - `observability`: metrics registry and trace context
//! - `runtime`: node modes (storage / gateway)
//! - `services`: identifier allocation and the shortener service
//! - `storage`: mapping persistence backends
//! - `system`: logging initialization

pub mod api;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
