//! HTTP timing middleware
//!
//! Records one duration observation and one request-count increment for
//! every request, success or error, labeled by method, endpoint template,
//! and final status. Errors pass through unchanged after recording.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use super::classify_endpoint;
use crate::observability::Observability;

/// HTTP timing middleware factory
#[derive(Clone)]
pub struct TimingMiddleware {
    obs: Arc<Observability>,
}

impl TimingMiddleware {
    pub fn new(obs: Arc<Observability>) -> Self {
        Self { obs }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TimingMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TimingService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TimingService {
            service: Rc::new(service),
            obs: self.obs.clone(),
        }))
    }
}

pub struct TimingService<S> {
    service: Rc<S>,
    obs: Arc<Observability>,
}

impl<S, B> Service<ServiceRequest> for TimingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let obs = self.obs.clone();
        let start = Instant::now();

        // Extract method and endpoint for labels (avoid String allocation)
        let method = method_str(req.method());
        let endpoint = classify_endpoint(req.path());

        Box::pin(async move {
            let result = srv.call(req).await;

            let duration = start.elapsed().as_secs_f64();
            // An error reaching this layer still knows its response status;
            // never record it as a blanket 500.
            let status = match &result {
                Ok(response) => response.status(),
                Err(err) => err.as_response_error().status_code(),
            };

            obs.metrics
                .record_request(method, endpoint, status_label(status).as_ref(), duration);

            result
        })
    }
}

/// Map HTTP method to a static string (avoids allocation).
fn method_str(method: &actix_web::http::Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "HEAD" => "HEAD",
        "OPTIONS" => "OPTIONS",
        "PATCH" => "PATCH",
        _ => "OTHER",
    }
}

/// Map HTTP status code to its label (static for the common codes).
fn status_label(status: actix_web::http::StatusCode) -> Cow<'static, str> {
    match status.as_u16() {
        200 => Cow::Borrowed("200"),
        400 => Cow::Borrowed("400"),
        404 => Cow::Borrowed("404"),
        409 => Cow::Borrowed("409"),
        500 => Cow::Borrowed("500"),
        502 => Cow::Borrowed("502"),
        503 => Cow::Borrowed("503"),
        other => Cow::Owned(other.to_string()),
    }
}
