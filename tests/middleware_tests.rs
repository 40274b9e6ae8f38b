//! Middleware tests
//!
//! Covers the instrumentation completeness invariant (exactly one counter
//! increment and one latency observation per request, success or failure)
//! and trace context propagation through the middleware chain.

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, web};
use std::sync::Arc;

use shortgate::api::middleware::{TimingMiddleware, TraceMiddleware};
use shortgate::api::services::{health_routes, mapping_routes};
use shortgate::errors::ErrorBody;
use shortgate::observability::{Observability, TraceContext};
use shortgate::runtime::modes::json_error_config;
use shortgate::services::{IdAllocator, ShortenerService};
use shortgate::storage::MappingStore;
use shortgate::storage::memory::MemoryStore;

// =============================================================================
// Test Setup
// =============================================================================

/// Handler exposing the trace context a request carries, so tests can see
/// exactly what the middleware injected.
async fn trace_probe(req: HttpRequest) -> HttpResponse {
    let ctx = req
        .extensions()
        .get::<TraceContext>()
        .cloned()
        .expect("trace context missing from request extensions");
    HttpResponse::Ok().json(serde_json::json!({
        "trace_id": ctx.trace_id,
        "span_id": ctx.span_id,
        "parent_span_id": ctx.parent_span_id,
        "sampled": ctx.sampled,
    }))
}

macro_rules! instrumented_app {
    ($obs:expr) => {{
        let store: Arc<dyn MappingStore> = Arc::new(MemoryStore::new());
        let shortener = Arc::new(ShortenerService::new(store, IdAllocator));
        test::init_service(
            App::new()
                .wrap(TimingMiddleware::new($obs.clone()))
                .wrap(TraceMiddleware::new($obs.clone()))
                .app_data(web::Data::new(shortener))
                .app_data(web::Data::new($obs.clone()))
                .app_data(json_error_config())
                .route("/trace-probe", web::get().to(trace_probe))
                .service(health_routes())
                .service(mapping_routes()),
        )
        .await
    }};
}

// =============================================================================
// Instrumentation completeness
// =============================================================================

#[tokio::test]
async fn every_request_records_one_counter_and_one_latency_sample() {
    let obs = Arc::new(Observability::new("shortgate-test").unwrap());
    let app = instrumented_app!(obs);

    // Success path
    let req = TestRequest::post()
        .uri("/shorten")
        .set_json(serde_json::json!({ "url": "https://example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Error path: resolve miss
    let req = TestRequest::get().uri("/resolve/zzzzzzzz").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Error path: malformed body
    let req = TestRequest::post()
        .uri("/shorten")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let counters = &obs.metrics.http_requests_total;
    let histograms = &obs.metrics.http_request_duration_seconds;

    for labels in [
        ["POST", "/shorten", "200"],
        ["GET", "/resolve/{short_id}", "404"],
        ["POST", "/shorten", "400"],
    ] {
        assert_eq!(
            counters.with_label_values(&labels).get(),
            1,
            "counter for {:?}",
            labels
        );
        assert_eq!(
            histograms.with_label_values(&labels).get_sample_count(),
            1,
            "histogram for {:?}",
            labels
        );
    }
}

#[tokio::test]
async fn latency_labels_use_the_endpoint_template_not_the_raw_path() {
    let obs = Arc::new(Observability::new("shortgate-test").unwrap());
    let app = instrumented_app!(obs);

    for id in ["aaaaaaaa", "bbbbbbbb", "cccccccc"] {
        let req = TestRequest::get()
            .uri(&format!("/resolve/{}", id))
            .to_request();
        test::call_service(&app, req).await;
    }

    // All three land under one template label, none under raw paths
    assert_eq!(
        obs.metrics
            .http_requests_total
            .with_label_values(&["GET", "/resolve/{short_id}", "404"])
            .get(),
        3
    );

    let exposition = obs.export().unwrap();
    assert!(exposition.contains(r#"endpoint="/resolve/{short_id}""#));
    assert!(!exposition.contains(r#"endpoint="/resolve/aaaaaaaa""#));
}

#[tokio::test]
async fn errors_are_recorded_but_not_masked() {
    let obs = Arc::new(Observability::new("shortgate-test").unwrap());
    let app = instrumented_app!(obs);

    let req = TestRequest::get().uri("/resolve/zzzzzzzz").to_request();
    let resp = test::call_service(&app, req).await;

    // The instrumented response still carries the original structured error
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "not_found");

    // ...and was recorded with its real status, not a blanket 500
    assert_eq!(
        obs.metrics
            .http_requests_total
            .with_label_values(&["GET", "/resolve/{short_id}", "404"])
            .get(),
        1
    );
    assert_eq!(
        obs.metrics
            .http_requests_total
            .with_label_values(&["GET", "/resolve/{short_id}", "500"])
            .get(),
        0
    );
}

// =============================================================================
// Trace propagation
// =============================================================================

#[tokio::test]
async fn requests_without_context_get_a_root_trace() {
    let obs = Arc::new(Observability::new("shortgate-test").unwrap());
    let app = instrumented_app!(obs);

    let req = TestRequest::get().uri("/trace-probe").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let trace_header = resp
        .headers()
        .get("x-trace-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("x-trace-id header missing");

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["trace_id"].as_str().unwrap(), trace_header);
    assert_eq!(body["trace_id"].as_str().unwrap().len(), 32);
    assert_eq!(body["span_id"].as_str().unwrap().len(), 16);
    assert!(body["parent_span_id"].is_null());
}

#[tokio::test]
async fn incoming_traceparent_becomes_a_child_context() {
    let obs = Arc::new(Observability::new("shortgate-test").unwrap());
    let app = instrumented_app!(obs);

    let req = TestRequest::get()
        .uri("/trace-probe")
        .insert_header((
            "traceparent",
            "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01",
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["trace_id"].as_str().unwrap(),
        "0af7651916cd43dd8448eb211c80319c"
    );
    assert_eq!(
        body["parent_span_id"].as_str().unwrap(),
        "b7ad6b7169203331"
    );
    // The node gets its own span under the caller's
    assert_ne!(body["span_id"].as_str().unwrap(), "b7ad6b7169203331");
}

#[tokio::test]
async fn malformed_traceparent_falls_back_to_a_root_trace() {
    let obs = Arc::new(Observability::new("shortgate-test").unwrap());
    let app = instrumented_app!(obs);

    let req = TestRequest::get()
        .uri("/trace-probe")
        .insert_header(("traceparent", "not-a-context"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["trace_id"].as_str().unwrap().len(), 32);
    assert!(body["parent_span_id"].is_null());
}

#[tokio::test]
async fn error_responses_still_carry_the_trace_id() {
    let obs = Arc::new(Observability::new("shortgate-test").unwrap());
    let app = instrumented_app!(obs);

    let req = TestRequest::get().uri("/resolve/zzzzzzzz").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("x-trace-id"));
}
