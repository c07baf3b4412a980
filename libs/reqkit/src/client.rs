use crate::builder::RequestBuilder;
use crate::config::{ClientConfig, TlsRootConfig};
use crate::error::Error;
use crate::tls;
use crate::transport::{BoxTransport, NetTransport, ResponseBody};
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client as HyperClient;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::time::Duration;
use tower::Service;
use tower::util::BoxCloneService;

/// HTTP client owning the base transport.
///
/// `Clone` is cheap: each request executes on its own clone of the base
/// service, and hyper's connection pool is shared beneath all clones, so
/// independent requests from independent builders run concurrently without
/// any shared builder state.
///
/// # Example
///
/// ```ignore
/// let client = Client::new()?;
/// let resp = client
///     .request()
///     .url("https://api.example.com/health")
///     .send()
///     .await?;
/// assert!(resp.status().is_success());
/// ```
#[derive(Clone)]
pub struct Client {
    transport: BoxTransport,
}

impl Client {
    /// Client with default configuration.
    ///
    /// # Errors
    /// Returns [`Error::Tls`] when TLS initialization fails.
    pub fn new() -> Result<Self, Error> {
        ClientBuilder::new().build()
    }

    /// Builder for a client with custom configuration.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client over a custom base transport.
    ///
    /// The transport boundary is opaque: anything with the
    /// send-one-request-descriptor capability fits, which is how tests swap
    /// in doubles and how an alternative network stack would plug in.
    pub fn with_transport<S>(transport: S) -> Self
    where
        S: Service<Request<Full<Bytes>>, Response = Response<ResponseBody>, Error = Error>
            + Clone
            + Send
            + 'static,
        S::Future: Send + 'static,
    {
        Self {
            transport: BoxCloneService::new(transport),
        }
    }

    /// Fresh request builder (GET, JSON codec) bound to this client's base
    /// transport. A builder describes one logical request and is consumed by
    /// executing it; create a new one per request rather than reusing state
    /// across unrelated calls.
    #[must_use]
    pub fn request(&self) -> RequestBuilder {
        RequestBuilder::new(self.transport.clone())
    }
}

/// Builder constructing a [`Client`] from a [`ClientConfig`].
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Builder seeded with the given configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Select the TLS root-certificate source.
    #[must_use]
    pub fn tls_roots(mut self, tls_roots: TlsRootConfig) -> Self {
        self.config.tls_roots = tls_roots;
        self
    }

    /// Close pooled connections idle longer than this; `None` keeps them
    /// indefinitely.
    #[must_use]
    pub fn pool_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Maximum idle connections kept per host.
    #[must_use]
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns [`Error::Tls`] when no usable TLS roots are available.
    pub fn build(self) -> Result<Client, Error> {
        let connector = build_connector(self.config.tls_roots)?;

        let mut builder = HyperClient::builder(TokioExecutor::new());
        // pool_timer is required for pool_idle_timeout to take effect
        builder
            .pool_timer(TokioTimer::new())
            .pool_max_idle_per_host(self.config.pool_max_idle_per_host);
        if let Some(idle) = self.config.pool_idle_timeout {
            builder.pool_idle_timeout(idle);
        }
        let hyper_client = builder.build::<_, Full<Bytes>>(connector);

        Ok(Client {
            transport: BoxCloneService::new(NetTransport::new(hyper_client)),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn build_connector(tls_roots: TlsRootConfig) -> Result<HttpsConnector<HttpConnector>, Error> {
    match tls_roots {
        TlsRootConfig::WebPki => {
            let builder = hyper_rustls::HttpsConnectorBuilder::new()
                .with_provider_and_webpki_roots(tls::crypto_provider())
                .map_err(|e| Error::Tls(Box::new(e)))?;
            Ok(builder.https_or_http().enable_all_versions().build())
        }
        TlsRootConfig::Native => {
            let config = tls::native_roots_config()?;
            let builder =
                hyper_rustls::HttpsConnectorBuilder::new().with_tls_config((*config).clone());
            Ok(builder.https_or_http().enable_all_versions().build())
        }
    }
}
