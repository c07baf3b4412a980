use crate::codec::{Codec, Json};
use crate::context::Deadline;
use crate::error::{Error, InvalidUriKind};
use crate::response::HttpResponse;
use crate::transport::{BoxTransport, ResponseBody, TransportWrapper};
use bytes::Bytes;
use http::{Method, Request, Response};
use http_body_util::Full;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tower::util::BoxCloneService;
use tower::{Layer, Service, ServiceExt};

/// Fluent HTTP request builder.
///
/// Created by [`Client::request`](crate::Client::request). Accumulates the
/// request description (URL, method, headers, query parameters, body, codec)
/// and an ordered decorator list, then executes once via
/// [`send`](RequestBuilder::send) or [`recv`](RequestBuilder::recv).
///
/// A builder describes exactly one logical request: it is consumed by
/// execution, and the decorator chain is folded over the base transport
/// fresh at that point — there is no cached composed transport to
/// invalidate, and concurrent executions never share builder state.
///
/// # Example
///
/// ```ignore
/// use reqkit::{Client, TimeoutLayer, TraceLayer, LoggingLayer};
/// use std::time::Duration;
///
/// let client = Client::new()?;
/// let out: Created = client
///     .request()
///     .base_url("https://api.example.com")
///     .url("/widgets")
///     .method(http::Method::POST)
///     .query("dry_run", "false")
///     .body(&NewWidget { name: "w1" })
///     .layer(TraceLayer::new("inventory"))
///     .layer(LoggingLayer::new("inventory"))
///     .layer(TimeoutLayer::new(Duration::from_secs(2)))
///     .recv()
///     .await?;
/// ```
#[must_use = "RequestBuilder does nothing until .send() or .recv() is called"]
pub struct RequestBuilder<C: Codec = Json> {
    transport: BoxTransport,
    codec: C,
    method: Option<Method>,
    base_url: Option<String>,
    url: String,
    query: Vec<(String, String)>,
    headers: Vec<(http::header::HeaderName, http::header::HeaderValue)>,
    body: Option<Bytes>,
    deadline: Option<Instant>,
    wrappers: Vec<TransportWrapper>,
    /// Error captured during building (deferred to execution)
    error: Option<Error>,
}

impl RequestBuilder<Json> {
    pub(crate) fn new(transport: BoxTransport) -> Self {
        Self {
            transport,
            codec: Json,
            method: None,
            base_url: None,
            url: String::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            deadline: None,
            wrappers: Vec::new(),
            error: None,
        }
    }
}

impl<C: Codec> RequestBuilder<C> {
    /// Set the request URL (absolute, or relative when a base URL is set).
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set a base URL prefixed to the relative URL at execution time.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP method. Defaults to GET when unset.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Add a query parameter. Repeatable; repeated keys keep every value in
    /// insertion order. Parameters are appended to the URL only at execution
    /// time, keys sorted for a deterministic representation.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header. Repeatable; headers accumulate rather than replace.
    /// An invalid name or value is deferred and surfaces at execution.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        match (
            http::header::HeaderName::try_from(name),
            http::header::HeaderValue::try_from(value),
        ) {
            (Ok(name), Ok(value)) => self.headers.push((name, value)),
            (Err(e), _) => self.error = Some(e.into()),
            (_, Err(e)) => self.error = Some(e.into()),
        }
        self
    }

    /// Set the structured request body, encoded with the codec currently in
    /// effect (call [`codec`](Self::codec) first to use a non-default one).
    ///
    /// An encode failure is deferred and surfaces at execution as
    /// [`Error::Encode`] — the transport is never invoked for it.
    pub fn body<T: Serialize + ?Sized>(mut self, value: &T) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.codec.encode(value) {
            Ok(bytes) => self.body = Some(bytes),
            Err(err) => self.error = Some(Error::Encode(err)),
        }
        self
    }

    /// Swap the codec used to encode the body and decode the response.
    /// The codec in effect when [`body`](Self::body) is called performs the
    /// encode, so set the codec before the body.
    pub fn codec<D: Codec>(self, codec: D) -> RequestBuilder<D> {
        RequestBuilder {
            transport: self.transport,
            codec,
            method: self.method,
            base_url: self.base_url,
            url: self.url,
            query: self.query,
            headers: self.headers,
            body: self.body,
            deadline: self.deadline,
            wrappers: self.wrappers,
            error: self.error,
        }
    }

    /// Set an absolute deadline for the whole request. Decorators may
    /// tighten it but never loosen it.
    pub fn deadline(mut self, at: Instant) -> Self {
        self.deadline = Some(at);
        self
    }

    /// Append a transport decorator. Cumulative and order-preserving:
    /// the first-added decorator wraps outermost, so `[D1, D2, D3]`
    /// executes `D1 → D2 → D3 → base` and results propagate back
    /// `D3 → D2 → D1`.
    pub fn layer<L>(mut self, layer: L) -> Self
    where
        L: Layer<BoxTransport> + Send + 'static,
        L::Service: Service<Request<Full<Bytes>>, Response = Response<ResponseBody>, Error = Error>
            + Clone
            + Send
            + 'static,
        <L::Service as Service<Request<Full<Bytes>>>>::Future: Send + 'static,
    {
        self.wrappers
            .push(Box::new(move |inner| BoxCloneService::new(layer.layer(inner))));
        self
    }

    /// Execute the request and return the raw response.
    ///
    /// Non-2xx statuses are not errors at this layer; status interpretation
    /// belongs to the caller.
    ///
    /// # Errors
    /// The first error encountered: a deferred build error, URL assembly or
    /// validation failure, or a transport error. No aggregation.
    pub async fn send(self) -> Result<HttpResponse, Error> {
        let (_codec, response) = self.execute().await?;
        Ok(response)
    }

    /// Execute the request and decode the response body into `T` with the
    /// builder's codec. The body stream is fully consumed and released
    /// whether or not decoding succeeds.
    ///
    /// # Errors
    /// As [`send`](Self::send), plus [`Error::Decode`] when the body does
    /// not match `T`.
    pub async fn recv<T: DeserializeOwned>(self) -> Result<T, Error> {
        let (codec, response) = self.execute().await?;
        let body = response.bytes().await?;
        codec.decode(&body).map_err(Error::Decode)
    }

    async fn execute(self) -> Result<(C, HttpResponse), Error> {
        let mut this = self;
        if let Some(err) = this.error.take() {
            return Err(err);
        }

        let url = this.assemble_url()?;
        let uri = validate_url(&url)?;
        let method = this.method.take().unwrap_or(Method::GET);

        let mut builder = Request::builder().method(method).uri(uri);

        // Default content type from the codec only when the caller did not
        // supply one; the http builder appends headers rather than replacing.
        let has_content_type = this
            .headers
            .iter()
            .any(|(name, _)| *name == http::header::CONTENT_TYPE);
        if this.body.is_some() && !has_content_type {
            builder = builder.header(http::header::CONTENT_TYPE, this.codec.content_type());
        }
        for (name, value) in this.headers.drain(..) {
            builder = builder.header(name, value);
        }

        let body = this.body.take().unwrap_or_default();
        let mut request = builder.body(Full::new(body))?;
        if let Some(at) = this.deadline {
            request.extensions_mut().insert(Deadline(at));
        }

        // Fold the decorator chain over the base transport. The list runs in
        // reverse so the first-added decorator ends up outermost.
        let mut service = this.transport;
        for wrap in this.wrappers.into_iter().rev() {
            service = wrap(service);
        }

        let response = service.oneshot(request).await?;
        Ok((this.codec, HttpResponse::new(response)))
    }

    fn assemble_url(&self) -> Result<String, Error> {
        let mut url = match &self.base_url {
            Some(base) => format!("{base}{}", self.url),
            None => self.url.clone(),
        };
        if url.is_empty() {
            return Err(Error::InvalidUri {
                url,
                kind: InvalidUriKind::Empty,
                reason: "no URL configured".to_owned(),
            });
        }
        if !self.query.is_empty() {
            let mut pairs: Vec<(&str, &str)> = self
                .query
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            // Stable sort: repeated keys keep their insertion order
            pairs.sort_by(|a, b| a.0.cmp(b.0));
            let encoded = serde_urlencoded::to_string(&pairs)?;
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&encoded);
        }
        Ok(url)
    }
}

fn validate_url(url: &str) -> Result<http::Uri, Error> {
    let uri: http::Uri = url
        .parse()
        .map_err(|e: http::uri::InvalidUri| Error::InvalidUri {
            url: url.to_owned(),
            kind: InvalidUriKind::ParseError,
            reason: e.to_string(),
        })?;

    if uri.scheme_str().is_none() {
        return Err(Error::InvalidUri {
            url: url.to_owned(),
            kind: InvalidUriKind::MissingScheme,
            reason: "missing scheme".to_owned(),
        });
    }
    if uri.authority().is_none() {
        return Err(Error::InvalidUri {
            url: url.to_owned(),
            kind: InvalidUriKind::MissingAuthority,
            reason: "missing host/authority".to_owned(),
        });
    }
    Ok(uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::layers::{LoggingLayer, TimeoutLayer, TraceLayer};
    use http::StatusCode;
    use http_body_util::BodyExt;
    use httpmock::prelude::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::task::{Context, Poll};
    use std::time::Duration;

    fn boxed_body(bytes: Bytes) -> ResponseBody {
        Full::new(bytes).map_err(Into::into).boxed()
    }

    /// Base-transport double: counts invocations and answers with a canned
    /// response.
    #[derive(Clone)]
    struct MockTransport {
        calls: Arc<AtomicUsize>,
        status: StatusCode,
        body: Bytes,
    }

    impl MockTransport {
        fn ok(body: &'static str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    calls: calls.clone(),
                    status: StatusCode::OK,
                    body: Bytes::from_static(body.as_bytes()),
                },
                calls,
            )
        }
    }

    impl Service<Request<Full<Bytes>>> for MockTransport {
        type Response = Response<ResponseBody>;
        type Error = Error;
        type Future = std::future::Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, _req: Request<Full<Bytes>>) -> Self::Future {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(Response::builder()
                .status(self.status)
                .body(boxed_body(self.body.clone()))
                .unwrap()))
        }
    }

    /// Decorator double: records its name when the request passes through.
    #[derive(Clone)]
    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Layer<BoxTransport> for Recording {
        type Service = RecordingService;

        fn layer(&self, inner: BoxTransport) -> Self::Service {
            RecordingService {
                inner,
                name: self.name,
                log: self.log.clone(),
            }
        }
    }

    #[derive(Clone)]
    struct RecordingService {
        inner: BoxTransport,
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Service<Request<Full<Bytes>>> for RecordingService {
        type Response = Response<ResponseBody>;
        type Error = Error;
        type Future = <BoxTransport as Service<Request<Full<Bytes>>>>::Future;

        fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            self.inner.poll_ready(cx)
        }

        fn call(&mut self, req: Request<Full<Bytes>>) -> Self::Future {
            self.log.lock().unwrap().push(self.name);
            self.inner.call(req)
        }
    }

    fn test_client() -> Client {
        // WebPki roots: independent of the host OS certificate store
        Client::builder()
            .tls_roots(crate::TlsRootConfig::WebPki)
            .build()
            .unwrap()
    }

    // --- URL assembly ---

    fn bare_builder() -> RequestBuilder {
        let (mock, _) = MockTransport::ok("");
        RequestBuilder::new(BoxCloneService::new(mock))
    }

    #[test]
    fn assemble_base_plus_relative() {
        let b = bare_builder().base_url("http://host:8080").url("/v1/items");
        assert_eq!(b.assemble_url().unwrap(), "http://host:8080/v1/items");
    }

    #[test]
    fn assemble_sorts_keys_and_keeps_repeated_values_in_order() {
        let b = bare_builder()
            .url("http://host/search")
            .query("tag", "first")
            .query("after", "x")
            .query("tag", "second");
        assert_eq!(
            b.assemble_url().unwrap(),
            "http://host/search?after=x&tag=first&tag=second"
        );
    }

    #[test]
    fn assemble_percent_encodes() {
        let b = bare_builder().url("http://host/q").query("name", "a b&c");
        assert_eq!(b.assemble_url().unwrap(), "http://host/q?name=a+b%26c");
    }

    #[test]
    fn assemble_joins_existing_query_with_ampersand() {
        let b = bare_builder().url("http://host/q?fixed=1").query("k", "v");
        assert_eq!(b.assemble_url().unwrap(), "http://host/q?fixed=1&k=v");
    }

    #[tokio::test]
    async fn empty_url_is_a_construction_error() {
        let err = bare_builder().send().await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidUri {
                kind: InvalidUriKind::Empty,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn relative_url_without_base_is_rejected() {
        let err = bare_builder().url("/only/a/path").send().await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidUri {
                kind: InvalidUriKind::MissingScheme,
                ..
            }
        ));
    }

    // --- execution semantics over a transport double ---

    #[tokio::test]
    async fn encode_failure_aborts_before_any_transport_call() {
        let (mock, calls) = MockTransport::ok("{}");

        // serde_json cannot encode maps with non-string keys
        let mut unencodable: HashMap<Vec<u8>, i32> = HashMap::new();
        unencodable.insert(vec![1], 2);

        let err = RequestBuilder::new(BoxCloneService::new(mock))
            .url("http://host/items")
            .method(http::Method::POST)
            .body(&unencodable)
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Encode(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_header_is_deferred_to_execution() {
        let (mock, calls) = MockTransport::ok("{}");

        let err = RequestBuilder::new(BoxCloneService::new(mock))
            .url("http://host/items")
            .header("bad header", "v")
            .send()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidHeaderName(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn decorators_run_in_declaration_order() {
        let (mock, _) = MockTransport::ok("{}");
        let log = Arc::new(Mutex::new(Vec::new()));

        RequestBuilder::new(BoxCloneService::new(mock))
            .url("http://host/")
            .layer(Recording {
                name: "d1",
                log: log.clone(),
            })
            .layer(Recording {
                name: "d2",
                log: log.clone(),
            })
            .layer(Recording {
                name: "d3",
                log: log.clone(),
            })
            .send()
            .await
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["d1", "d2", "d3"]);
    }

    /// Alternate codec double proving the builder drives encode, decode, and
    /// the content-type default through whatever codec is bound.
    #[derive(Debug, Clone, Copy)]
    struct PrettyJson;

    impl Codec for PrettyJson {
        fn encode<T: serde::Serialize + ?Sized>(
            &self,
            value: &T,
        ) -> Result<Bytes, crate::BoxError> {
            Ok(Bytes::from(serde_json::to_vec_pretty(value)?))
        }

        fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, crate::BoxError> {
            Ok(serde_json::from_slice(body)?)
        }

        fn content_type(&self) -> &'static str {
            "application/json; style=pretty"
        }
    }

    #[derive(Clone)]
    struct CaptureHeaders {
        seen: Arc<Mutex<Option<http::HeaderMap>>>,
        body: Bytes,
    }

    impl Service<Request<Full<Bytes>>> for CaptureHeaders {
        type Response = Response<ResponseBody>;
        type Error = Error;
        type Future = std::future::Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<Full<Bytes>>) -> Self::Future {
            *self.seen.lock().unwrap() = Some(req.headers().clone());
            std::future::ready(Ok(Response::builder()
                .status(StatusCode::OK)
                .body(boxed_body(self.body.clone()))
                .unwrap()))
        }
    }

    #[tokio::test]
    async fn swapped_codec_drives_encode_decode_and_content_type() {
        let seen = Arc::new(Mutex::new(None));
        let transport = CaptureHeaders {
            seen: seen.clone(),
            body: Bytes::from_static(br#"{"done": true}"#),
        };

        let out: serde_json::Value = RequestBuilder::new(BoxCloneService::new(transport))
            .url("http://host/items")
            .method(http::Method::POST)
            .codec(PrettyJson)
            .body(&json!({"a": 1}))
            .recv()
            .await
            .unwrap();

        assert_eq!(out, json!({"done": true}));

        let headers = seen.lock().unwrap().clone().unwrap();
        assert_eq!(
            headers
                .get(http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json; style=pretty")
        );
    }

    #[tokio::test]
    async fn decode_failure_is_a_decode_error() {
        #[derive(Deserialize, Debug)]
        struct Out {
            #[allow(dead_code)]
            value: i32,
        }

        let (mock, _) = MockTransport::ok("not json at all");

        let err = RequestBuilder::new(BoxCloneService::new(mock))
            .url("http://host/out")
            .recv::<Out>()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn logging_fires_once_even_when_decode_fails() {
        use tracing_subscriber::layer::SubscriberExt;

        #[derive(Clone)]
        struct CountEvents(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CountEvents {
            fn on_event(
                &self,
                event: &tracing::Event<'_>,
                _ctx: tracing_subscriber::layer::Context<'_, S>,
            ) {
                if event.metadata().target() == crate::layers::LOG_TARGET {
                    self.0.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountEvents(count.clone()));
        let _guard = tracing::subscriber::set_default(subscriber);

        let (mock, _) = MockTransport::ok("broken json");
        let err = RequestBuilder::new(BoxCloneService::new(mock))
            .url("http://host/x")
            .layer(LoggingLayer::new("demo"))
            .recv::<serde_json::Value>()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    // --- end-to-end scenarios against a mock server ---

    #[tokio::test]
    async fn echo_scenario_with_full_decorator_chain() {
        #[derive(serde::Serialize)]
        struct Req {
            a: &'static str,
        }

        #[derive(Deserialize)]
        struct Resp {
            #[serde(rename = "a")]
            b: String,
        }

        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(POST)
                .path("/echo")
                .json_body(json!({"a": "a"}));
            then.status(200).json_body(json!({"a": "b"}));
        });

        let out: Resp = test_client()
            .request()
            .url(format!("{}/echo", server.base_url()))
            .method(http::Method::POST)
            .body(&Req { a: "a" })
            .layer(TraceLayer::new("demo"))
            .layer(LoggingLayer::new("demo"))
            .layer(TimeoutLayer::new(Duration::from_secs(5)))
            .recv()
            .await
            .unwrap();

        assert_eq!(out.b, "b");
    }

    #[tokio::test]
    async fn no_decorators_needed_for_basic_operation() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/plain");
            then.status(200).body("ok");
        });

        let resp = test_client()
            .request()
            .url(format!("{}/plain", server.base_url()))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn slow_server_hits_the_timeout_decorator() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).body("late").delay(Duration::from_secs(3));
        });

        let started = std::time::Instant::now();
        let err = test_client()
            .request()
            .url(format!("{}/slow", server.base_url()))
            .layer(TimeoutLayer::new(Duration::from_secs(1)))
            .send()
            .await
            .unwrap_err();

        assert!(err.is_deadline_exceeded(), "got: {err:?}");
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn caller_deadline_beats_a_looser_timeout_decorator() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).body("late").delay(Duration::from_secs(2));
        });

        let started = std::time::Instant::now();
        let err = test_client()
            .request()
            .url(format!("{}/slow", server.base_url()))
            .deadline(Instant::now() + Duration::from_millis(200))
            .layer(TimeoutLayer::new(Duration::from_secs(60)))
            .send()
            .await
            .unwrap_err();

        assert!(err.is_deadline_exceeded(), "got: {err:?}");
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn repeated_query_keys_reach_the_server() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("tag", "a")
                .query_param("tag", "b")
                .query_param("page", "1");
            then.status(200).body("found");
        });

        let resp = test_client()
            .request()
            .base_url(server.base_url())
            .url("/search")
            .query("tag", "a")
            .query("tag", "b")
            .query("page", "1")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn multi_valued_headers_accumulate() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/h").header("x-tag", "one");
            then.status(200);
        });

        let resp = test_client()
            .request()
            .url(format!("{}/h", server.base_url()))
            .header("x-tag", "one")
            .header("x-tag", "two")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_2xx_status_is_not_an_error() {
        let server = MockServer::start();
        let _m = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("nope");
        });

        let resp = test_client()
            .request()
            .url(format!("{}/missing", server.base_url()))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
