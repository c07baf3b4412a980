use thiserror::Error;

/// Boxed error type used for opaque causes (transport, codec).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Classification of URL validation failures.
///
/// Provides programmatic matching for different failure modes without
/// relying on unstable error message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidUriKind {
    /// No URL was configured before execution
    Empty,
    /// URL could not be parsed (malformed syntax)
    ParseError,
    /// URL is missing required host/authority component
    MissingAuthority,
    /// URL is missing required scheme (http/https)
    MissingScheme,
}

/// Request errors.
///
/// Four families: encoding (`Encode`), request construction (`InvalidUri`,
/// `InvalidHeaderName`, `InvalidHeaderValue`, `QueryEncode`, `RequestBuild`),
/// transport (`Transport`), and decoding (`Decode`). `Tls` covers client
/// construction only and never occurs during request execution.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Request body could not be serialized. Local failure: the transport
    /// is never invoked.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] BoxError),

    /// Response body could not be deserialized into the target shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] BoxError),

    /// Invalid URL. Match on `kind`; `reason` is diagnostic text with an
    /// unstable format.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUri {
        /// The URL that failed validation
        url: String,
        /// Structured failure classification for programmatic matching
        kind: InvalidUriKind,
        /// Diagnostic message (unstable format, for logging only)
        reason: String,
    },

    /// Invalid header name
    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// Invalid header value
    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Query parameters could not be encoded into a query string
    #[error("failed to encode query string: {0}")]
    QueryEncode(#[from] serde_urlencoded::ser::Error),

    /// Request assembly failed
    #[error("failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    /// TLS setup failed while constructing the client
    #[error("TLS error: {0}")]
    Tls(#[source] BoxError),

    /// Transport error (connection, DNS, deadline, cancellation). The cause
    /// is opaque; deadline expiry carries a [`DeadlineExceeded`] source.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),
}

/// Source of an [`Error::Transport`] produced when the request deadline
/// expired before the inner call completed.
#[derive(Error, Debug)]
#[error("request deadline exceeded")]
pub struct DeadlineExceeded;

impl Error {
    /// Whether this is a transport error caused by deadline expiry.
    #[must_use]
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Error::Transport(source) if source.is::<DeadlineExceeded>())
    }
}

impl From<hyper::Error> for Error {
    fn from(err: hyper::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

impl From<hyper_util::client::legacy::Error> for Error {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}
