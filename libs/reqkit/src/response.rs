use crate::error::Error;
use crate::transport::ResponseBody;
use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};
use http_body_util::BodyExt;

/// HTTP response wrapper.
///
/// Status interpretation is the caller's responsibility: a non-2xx status is
/// not an error at this layer. The body is a stream consumed exactly once,
/// by [`bytes`](HttpResponse::bytes) (or the decode step in
/// [`RequestBuilder::recv`](crate::RequestBuilder::recv)), and is released
/// whether or not that read succeeds.
#[derive(Debug)]
pub struct HttpResponse {
    inner: Response<ResponseBody>,
}

impl HttpResponse {
    pub(crate) fn new(inner: Response<ResponseBody>) -> Self {
        Self { inner }
    }

    /// Response status code
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Response headers
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Consume the wrapper and return the inner response.
    #[must_use]
    pub fn into_inner(self) -> Response<ResponseBody> {
        self.inner
    }

    /// Consume the wrapper and return the body stream for incremental
    /// processing.
    #[must_use]
    pub fn into_body(self) -> ResponseBody {
        self.inner.into_body()
    }

    /// Collect the full body.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] when the stream fails mid-read.
    pub async fn bytes(self) -> Result<Bytes, Error> {
        match self.inner.into_body().collect().await {
            Ok(collected) => Ok(collected.to_bytes()),
            Err(err) => Err(Error::Transport(err)),
        }
    }

    /// Collect the full body as text, replacing invalid UTF-8.
    ///
    /// # Errors
    /// Returns [`Error::Transport`] when the stream fails mid-read.
    pub async fn text(self) -> Result<String, Error> {
        let bytes = self.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
