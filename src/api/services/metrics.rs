//! Prometheus metrics endpoint
//!
//! Exposes the request-count and request-latency series in Prometheus text
//! format at `/metrics` on both nodes.

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, web};
use tracing::error;

use crate::observability::Observability;

pub struct MetricsService;

impl MetricsService {
    /// Handle metrics export request
    pub async fn metrics(obs: web::Data<Arc<Observability>>) -> impl Responder {
        // An exposition failure degrades this scrape only; in-flight
        // requests keep recording into the registry regardless.
        match obs.export() {
            Ok(output) => HttpResponse::Ok()
                .content_type("text/plain; version=0.0.4; charset=utf-8")
                .body(output),
            Err(e) => {
                error!("Metrics export failed: {}", e);
                HttpResponse::InternalServerError()
                    .content_type("text/plain")
                    .body("metrics export failed")
            }
        }
    }
}
