use std::time::Duration;

/// TLS root-certificate source for the base transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TlsRootConfig {
    /// OS certificate store (cached after first load)
    #[default]
    Native,
    /// Bundled webpki roots
    WebPki,
}

/// Configuration for [`Client`](crate::Client) construction.
///
/// Only connection-pool pass-through knobs live here; pooling policy itself
/// belongs to the underlying hyper client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Where TLS root certificates come from
    pub tls_roots: TlsRootConfig,

    /// Close pooled connections idle longer than this. `None` keeps idle
    /// connections indefinitely.
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            tls_roots: TlsRootConfig::default(),
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 32,
        }
    }
}
