//! Storage node client
//!
//! The gateway's only outbound dependency. Every call carries a bounded
//! total timeout and the active trace context; transport-level failures
//! (connection refused, timeout) become `UpstreamUnavailable`, kept distinct
//! from application errors the storage node answered with.

use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::api::services::ShortenRequest;
use crate::errors::{Result, ShortgateError};
use crate::observability::TraceContext;
use crate::observability::trace::TRACEPARENT_HEADER;

/// A response the storage node actually produced, surfaced to the gateway
/// caller unchanged — status, content type, and body.
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
}

impl StorageClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                ShortgateError::config(format!("cannot build upstream HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Forward a shorten request to the storage node.
    pub async fn shorten(
        &self,
        request: &ShortenRequest,
        trace: Option<&TraceContext>,
    ) -> Result<UpstreamResponse> {
        let mut builder = self
            .http
            .post(format!("{}/shorten", self.base_url))
            .json(request);
        if let Some(ctx) = trace {
            builder = builder.header(TRACEPARENT_HEADER, ctx.traceparent());
        }
        Self::execute(builder).await
    }

    /// Forward a resolve request to the storage node.
    pub async fn resolve(
        &self,
        short_id: &str,
        trace: Option<&TraceContext>,
    ) -> Result<UpstreamResponse> {
        let mut builder = self
            .http
            .get(format!("{}/resolve/{}", self.base_url, short_id));
        if let Some(ctx) = trace {
            builder = builder.header(TRACEPARENT_HEADER, ctx.traceparent());
        }
        Self::execute(builder).await
    }

    async fn execute(builder: reqwest::RequestBuilder) -> Result<UpstreamResponse> {
        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(transport_error)?;

        debug!("Storage node answered {}", status);
        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}

/// Classify a reqwest failure. Anything that prevented a complete exchange
/// with the storage node counts as the upstream being unavailable; an error
/// the storage node itself answered with never takes this path.
fn transport_error(err: reqwest::Error) -> ShortgateError {
    if err.is_timeout() {
        ShortgateError::upstream_unavailable(format!("storage node timed out: {}", err))
    } else if err.is_connect() {
        ShortgateError::upstream_unavailable(format!("cannot reach storage node: {}", err))
    } else {
        ShortgateError::upstream_unavailable(format!("storage node call failed: {}", err))
    }
}
