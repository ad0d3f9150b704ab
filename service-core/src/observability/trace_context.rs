//! Outbound trace propagation.
//!
//! Calls to upstream APIs carry the active OpenTelemetry trace as W3C
//! `traceparent` / `tracestate` headers (https://www.w3.org/TR/trace-context/).
//! With the OTLP layer disabled there is no OpenTelemetry span, and requests go
//! out without them.

use opentelemetry::trace::{SpanContext, TraceContextExt};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub const TRACEPARENT_HEADER: &str = "traceparent";
pub const TRACESTATE_HEADER: &str = "tracestate";

/// `00-<trace id>-<span id>-<flags>`, or `None` for an invalid context.
pub fn traceparent(span_context: &SpanContext) -> Option<String> {
    span_context.is_valid().then(|| {
        format!(
            "00-{}-{}-{:02x}",
            span_context.trace_id(),
            span_context.span_id(),
            span_context.trace_flags().to_u8()
        )
    })
}

/// Vendor entries of a valid context, `None` when there are none.
pub fn tracestate(span_context: &SpanContext) -> Option<String> {
    let state = span_context.trace_state().header();
    (span_context.is_valid() && !state.is_empty()).then_some(state)
}

fn write_headers(span_context: &SpanContext, headers: &mut HeaderMap) {
    let pairs = [
        (TRACEPARENT_HEADER, traceparent(span_context)),
        (TRACESTATE_HEADER, tracestate(span_context)),
    ];
    for (name, value) in pairs {
        if let Some(value) = value.and_then(|v| HeaderValue::from_str(&v).ok()) {
            headers.insert(name, value);
        }
    }
}

/// Add the current span's trace headers to `headers`.
pub fn inject_trace_context(headers: &mut HeaderMap) {
    let context = Span::current().context();
    write_headers(context.span().span_context(), headers);
}

/// `reqwest::Client` helpers that start requests with trace headers attached.
pub trait TracedClientExt {
    fn traced_post(&self, url: &str) -> RequestBuilder;
}

impl TracedClientExt for Client {
    fn traced_post(&self, url: &str) -> RequestBuilder {
        let mut headers = HeaderMap::new();
        inject_trace_context(&mut headers);
        self.post(url).headers(headers)
    }
}
