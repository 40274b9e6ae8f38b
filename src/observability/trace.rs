//! Distributed trace context
//!
//! Carries the correlation ids threaded from the gateway into the storage
//! node. The wire form is the W3C `traceparent` header:
//! `00-{trace_id:32x}-{span_id:16x}-{flags:2x}`.

use uuid::Uuid;

/// Header used to propagate the context on outbound calls.
pub const TRACEPARENT_HEADER: &str = "traceparent";

/// Per-request trace correlation state.
///
/// Created by the trace middleware, read-only afterwards. `span_id` names
/// this request's own span; `parent_span_id` is the caller's span when the
/// request arrived with a `traceparent` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub sampled: bool,
}

impl TraceContext {
    /// Start a new root context with fresh random ids.
    pub fn root() -> Self {
        Self {
            trace_id: Uuid::new_v4().simple().to_string(),
            span_id: new_span_id(),
            parent_span_id: None,
            sampled: true,
        }
    }

    /// Continue an incoming `traceparent` as a child context: same trace id,
    /// fresh span id, the caller's span id as parent.
    ///
    /// Returns `None` for malformed headers; callers fall back to a root.
    pub fn child_of(traceparent: &str) -> Option<Self> {
        let mut parts = traceparent.trim().split('-');
        let version = parts.next()?;
        let trace_id = parts.next()?;
        let parent_span_id = parts.next()?;
        let flags = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        if version != "00" {
            return None;
        }
        if !is_hex(trace_id, 32) || trace_id.bytes().all(|b| b == b'0') {
            return None;
        }
        if !is_hex(parent_span_id, 16) || parent_span_id.bytes().all(|b| b == b'0') {
            return None;
        }
        if !is_hex(flags, 2) {
            return None;
        }

        let sampled = u8::from_str_radix(flags, 16).ok()? & 0x01 == 0x01;

        Some(Self {
            trace_id: trace_id.to_ascii_lowercase(),
            span_id: new_span_id(),
            parent_span_id: Some(parent_span_id.to_ascii_lowercase()),
            sampled,
        })
    }

    /// Render this context for the outbound `traceparent` header.
    pub fn traceparent(&self) -> String {
        format!(
            "00-{}-{}-{:02x}",
            self.trace_id,
            self.span_id,
            if self.sampled { 0x01u8 } else { 0x00 }
        )
    }
}

fn new_span_id() -> String {
    Uuid::new_v4().simple().to_string()[..16].to_string()
}

fn is_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit())
}
