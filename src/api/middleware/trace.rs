//! Trace propagation middleware
//!
//! Continues an incoming `traceparent` header as a child context (or starts
//! a new root), exposes the context to handlers through request extensions,
//! and wraps the request in a tracing span carrying the correlation ids and
//! the node's identity.

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{HeaderName, HeaderValue},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, info_span};

use super::{classify_endpoint, operation_name};
use crate::observability::trace::TRACEPARENT_HEADER;
use crate::observability::{Observability, TraceContext};

/// Trace middleware factory
#[derive(Clone)]
pub struct TraceMiddleware {
    obs: Arc<Observability>,
}

impl TraceMiddleware {
    pub fn new(obs: Arc<Observability>) -> Self {
        Self { obs }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TraceMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceService {
            service: Rc::new(service),
            obs: self.obs.clone(),
        }))
    }
}

pub struct TraceService<S> {
    service: Rc<S>,
    obs: Arc<Observability>,
}

impl<S, B> Service<ServiceRequest> for TraceService<S>
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

        // Child of the incoming context when a well-formed traceparent is
        // present, fresh root otherwise
        let ctx = req
            .headers()
            .get(TRACEPARENT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(TraceContext::child_of)
            .unwrap_or_else(TraceContext::root);

        // Handlers (the gateway's outbound client in particular) read the
        // context from request extensions.
        req.extensions_mut().insert(ctx.clone());

        let span = info_span!(
            "request",
            service = %self.obs.service(),
            operation = operation_name(req.path()),
            method = %req.method(),
            endpoint = classify_endpoint(req.path()),
            trace_id = %ctx.trace_id,
            span_id = %ctx.span_id,
            parent_span_id = tracing::field::Empty,
            status = tracing::field::Empty,
        );
        if let Some(parent) = &ctx.parent_span_id {
            span.record("parent_span_id", tracing::field::display(parent));
        }

        let trace_id = ctx.trace_id;

        Box::pin(
            async move {
                let result = srv.call(req).await;

                match result {
                    Ok(mut response) => {
                        tracing::Span::current()
                            .record("status", response.status().as_u16() as u64);

                        // Echo the trace id so callers can correlate logs
                        if let Ok(header_value) = HeaderValue::from_str(&trace_id) {
                            response
                                .headers_mut()
                                .insert(HeaderName::from_static("x-trace-id"), header_value);
                        }

                        Ok(response)
                    }
                    Err(err) => {
                        tracing::Span::current().record(
                            "status",
                            err.as_response_error().status_code().as_u16() as u64,
                        );
                        // The span closes with the recorded status; the error
                        // itself continues up the chain untouched.
                        Err(err)
                    }
                }
            }
            .instrument(span),
        )
    }
}
