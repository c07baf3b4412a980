use crate::context::TraceId;
use crate::otel;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer that traces each outbound request.
///
/// Opens a client span per request with `http.method` / `http.url` /
/// `otel.kind` attributes, injects W3C trace-context headers through the
/// global propagator, binds the trace identifier into the request extensions
/// for inner decorators (the logging layer reads it), and records
/// `http.status_code` and `error` when the inner call returns.
///
/// Everything here is best-effort: a subscriber without an OpenTelemetry
/// layer, an uninstalled propagator, or an unsampled span never fails the
/// request.
#[derive(Debug, Clone)]
pub struct TraceLayer {
    service: String,
}

impl TraceLayer {
    /// Layer tagging spans with the given logical service name.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl<S> Layer<S> for TraceLayer {
    type Service = TraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TraceService {
            inner,
            service: self.service.clone(),
        }
    }
}

/// Service that wraps requests in a client tracing span.
#[derive(Debug, Clone)]
pub struct TraceService<S> {
    inner: S,
    service: String,
}

impl<S, ResBody> Service<Request<Full<Bytes>>> for TraceService<S>
where
    S: Service<Request<Full<Bytes>>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Full<Bytes>>) -> Self::Future {
        use tracing::{Instrument, Level};

        let uri = req.uri();
        // Query string stripped: it may carry sensitive parameters
        let url_str = format!(
            "{}://{}{}",
            uri.scheme_str().unwrap_or("https"),
            uri.authority().map_or("", http::uri::Authority::as_str),
            uri.path()
        );

        let span = tracing::span!(
            Level::INFO, "client_request",
            service = %self.service,
            http.method = %req.method(),
            http.url = %url_str,
            otel.kind = "client",
            http.status_code = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        otel::inject_span_context(&span, req.headers_mut());
        if let Some(trace_id) = otel::span_trace_id(&span) {
            req.extensions_mut().insert(TraceId::new(trace_id));
        }

        // Swap so we call the instance that was poll_ready'd, leaving a fresh
        // clone for the next poll_ready cycle.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let result = inner.call(req).instrument(span.clone()).await;

            match &result {
                Ok(response) => {
                    span.record("http.status_code", response.status().as_u16());
                    if response.status().is_client_error() || response.status().is_server_error() {
                        span.record("error", true);
                    }
                }
                Err(_) => {
                    span.record("error", true);
                }
            }

            result
        })
    }
}
