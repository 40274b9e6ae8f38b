//! Logical endpoint classification
//!
//! Metric labels and span names use the path template, never the raw path,
//! so emitted sample cardinality stays bounded no matter what ids clients
//! request.

/// Map a raw request path to its route template.
pub fn classify_endpoint(path: &str) -> &'static str {
    if path == "/shorten" {
        "/shorten"
    } else if path == "/resolve" || path.starts_with("/resolve/") {
        "/resolve/{short_id}"
    } else if path == "/health" {
        "/health"
    } else if path == "/metrics" {
        "/metrics"
    } else {
        "other"
    }
}

/// Logical operation name used for the request span.
pub fn operation_name(path: &str) -> &'static str {
    match classify_endpoint(path) {
        "/shorten" => "shorten",
        "/resolve/{short_id}" => "resolve",
        "/health" => "health",
        "/metrics" => "metrics",
        _ => "other",
    }
}
