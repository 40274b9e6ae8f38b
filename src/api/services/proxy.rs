//! Gateway forwarding endpoints
//!
//! The gateway owns no shortening logic: it relays `/shorten` and
//! `/resolve/{short_id}` to the storage node and mirrors whatever the node
//! answered — same status, same body. Only transport failures produce a
//! gateway-originated error (`upstream_unavailable`).

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};

use super::ShortenRequest;
use crate::client::{StorageClient, UpstreamResponse};
use crate::errors::ShortgateError;
use crate::observability::TraceContext;

pub struct ProxyService;

impl ProxyService {
    pub async fn shorten(
        req: HttpRequest,
        body: web::Json<ShortenRequest>,
        client: web::Data<Arc<StorageClient>>,
    ) -> Result<HttpResponse, ShortgateError> {
        let trace = current_trace(&req);
        let upstream = client.shorten(&body, trace.as_ref()).await?;
        Ok(forward(upstream))
    }

    pub async fn resolve(
        req: HttpRequest,
        path: web::Path<String>,
        client: web::Data<Arc<StorageClient>>,
    ) -> Result<HttpResponse, ShortgateError> {
        let trace = current_trace(&req);
        let upstream = client.resolve(&path.into_inner(), trace.as_ref()).await?;
        Ok(forward(upstream))
    }
}

/// The context placed in extensions by the trace middleware; absent only if
/// the route was wired without it.
fn current_trace(req: &HttpRequest) -> Option<TraceContext> {
    req.extensions().get::<TraceContext>().cloned()
}

/// Mirror an upstream response verbatim.
fn forward(upstream: UpstreamResponse) -> HttpResponse {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    if let Some(content_type) = upstream.content_type {
        builder.content_type(content_type);
    }
    builder.body(upstream.body)
}

/// Gateway 路由配置
pub fn proxy_routes() -> actix_web::Scope {
    web::scope("")
        .route("/shorten", web::post().to(ProxyService::shorten))
        .route("/resolve/{short_id}", web::get().to(ProxyService::resolve))
}
