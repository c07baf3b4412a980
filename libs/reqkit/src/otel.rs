//! W3C trace-context helpers for outbound requests.
//!
//! Bridges `tracing` spans to the OpenTelemetry propagation machinery: the
//! trace decorator hands its span here to stamp `traceparent`/`tracestate`
//! onto the outgoing headers and to learn its trace identifier. Everything is
//! best-effort; a span without a valid OTEL context simply produces nothing.

use http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::global;
use opentelemetry::propagation::Injector;
use opentelemetry::trace::TraceContextExt;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// W3C Trace Context header name
pub const TRACEPARENT: &str = "traceparent";

/// Adapter for injecting trace-context key/values into HTTP headers
struct HeadersInjector<'a>(&'a mut HeaderMap);

impl Injector for HeadersInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let Ok(name) = HeaderName::from_bytes(key.as_bytes())
            && let Ok(val) = HeaderValue::from_str(&value)
        {
            self.0.insert(name, val);
        }
    }
}

/// Inject `span`'s trace context into `headers` via the global propagator.
pub fn inject_span_context(span: &tracing::Span, headers: &mut HeaderMap) {
    let cx = span.context();
    global::get_text_map_propagator(|propagator| {
        propagator.inject_context(&cx, &mut HeadersInjector(headers));
    });
}

/// Trace identifier of `span`, when it carries a valid OTEL context.
#[must_use]
pub fn span_trace_id(span: &tracing::Span) -> Option<String> {
    let cx = span.context();
    let span_context = cx.span().span_context().clone();
    span_context
        .is_valid()
        .then(|| span_context.trace_id().to_string())
}

/// Extract the `traceparent` header value, if present and readable.
#[must_use]
pub fn get_traceparent(headers: &HeaderMap) -> Option<&str> {
    headers.get(TRACEPARENT)?.to_str().ok()
}

/// Parse the trace ID out of a W3C traceparent value
/// (format: `00-{trace_id}-{span_id}-{flags}`).
#[must_use]
pub fn parse_trace_id(traceparent: &str) -> Option<&str> {
    let mut parts = traceparent.split('-');
    let version = parts.next()?;
    let trace_id = parts.next()?;
    let _span_id = parts.next()?;
    let _flags = parts.next()?;
    (version == "00" && trace_id.len() == 32).then_some(trace_id)
}
