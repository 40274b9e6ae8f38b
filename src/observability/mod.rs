//! Observability context
//!
//! One `Observability` value is constructed per process at startup and
//! injected into the middleware chain and the `/metrics` handler. There is
//! deliberately no global registry or ambient lookup.

mod metrics;
pub mod trace;

pub use metrics::HttpMetrics;
pub use trace::TraceContext;

use chrono::{DateTime, Utc};

use crate::errors::Result;

/// Per-process observability state: service identity plus the metric series
/// every request is recorded into.
pub struct Observability {
    service: String,
    pub metrics: HttpMetrics,
    started_at: DateTime<Utc>,
}

impl Observability {
    pub fn new(service: &str) -> Result<Self> {
        Ok(Self {
            service: service.to_string(),
            metrics: HttpMetrics::new(service)?,
            started_at: Utc::now(),
        })
    }

    /// The node's identity, attached to spans and metric labels.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Export all series in Prometheus text format, refreshing the uptime
    /// gauge first.
    pub fn export(&self) -> Result<String> {
        let uptime = (Utc::now() - self.started_at).num_seconds().max(0) as f64;
        self.metrics.uptime_seconds.set(uptime);
        self.metrics.export()
    }
}
