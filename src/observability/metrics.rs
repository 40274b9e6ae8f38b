//! Prometheus metric series
//!
//! Defines the request-count and request-latency series recorded by the
//! timing middleware. The registry is owned by [`super::Observability`],
//! never stored in a static.

use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::errors::{Result, ShortgateError};

/// HTTP metrics container
pub struct HttpMetrics {
    registry: Registry,

    /// Total requests by (method, endpoint, status)
    pub http_requests_total: IntCounterVec,
    /// Request duration distribution by (method, endpoint, status)
    pub http_request_duration_seconds: HistogramVec,
    /// Process uptime in seconds, refreshed at scrape time
    pub uptime_seconds: Gauge,
}

impl HttpMetrics {
    pub fn new(service: &str) -> Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("shortgate_http_requests_total", "Total HTTP requests")
                .const_label("service", service),
            &["method", "endpoint", "status"],
        )
        .map_err(|e| ShortgateError::internal(format!("failed to create counter: {}", e)))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "shortgate_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .const_label("service", service),
            &["method", "endpoint", "status"],
        )
        .map_err(|e| ShortgateError::internal(format!("failed to create histogram: {}", e)))?;

        let uptime_seconds = Gauge::with_opts(
            Opts::new("shortgate_uptime_seconds", "Server uptime in seconds")
                .const_label("service", service),
        )
        .map_err(|e| ShortgateError::internal(format!("failed to create gauge: {}", e)))?;

        registry
            .register(Box::new(http_requests_total.clone()))
            .map_err(|e| ShortgateError::internal(format!("failed to register counter: {}", e)))?;
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .map_err(|e| {
                ShortgateError::internal(format!("failed to register histogram: {}", e))
            })?;
        registry
            .register(Box::new(uptime_seconds.clone()))
            .map_err(|e| ShortgateError::internal(format!("failed to register gauge: {}", e)))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            uptime_seconds,
        })
    }

    /// Record one completed request into both series.
    pub fn record_request(&self, method: &str, endpoint: &str, status: &str, duration_secs: f64) {
        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint, status])
            .observe(duration_secs);
        self.http_requests_total
            .with_label_values(&[method, endpoint, status])
            .inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| ShortgateError::internal(format!("failed to encode metrics: {}", e)))?;
        String::from_utf8(buffer)
            .map_err(|e| ShortgateError::internal(format!("metrics output is not UTF-8: {}", e)))
    }
}
