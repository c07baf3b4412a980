use crate::context::Deadline;
use crate::error::{BoxError, DeadlineExceeded, Error};
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client as HyperClient;
use hyper_util::client::legacy::connect::HttpConnector;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::Service;
use tower::util::BoxCloneService;

/// Boxed response body, type-erased over the concrete hyper body.
pub type ResponseBody = http_body_util::combinators::BoxBody<Bytes, BoxError>;

/// The transport capability: accept one request descriptor, produce a
/// response descriptor or fail with a transport error.
///
/// Every decorator consumes and produces this same shape, which is what lets
/// the chain compose uniformly — the base network transport is not a special
/// case. Boxed and clonable so a heterogeneous decorator stack can be folded
/// over it.
pub type BoxTransport = BoxCloneService<Request<Full<Bytes>>, Response<ResponseBody>, Error>;

/// A decorator captured as a deferred transformation of one transport into
/// another. Applied when the request executes, in the order recorded by the
/// builder.
pub(crate) type TransportWrapper = Box<dyn FnOnce(BoxTransport) -> BoxTransport + Send>;

/// Base network transport over the pooled hyper client.
///
/// This is the context-aware end of the chain: it reads the [`Deadline`]
/// request extension and bounds the network call with it, so decorators that
/// tighten the deadline never need to race their own timer. Expiry surfaces
/// as [`Error::Transport`] with a [`DeadlineExceeded`] source; dropping the
/// returned future cancels the in-flight call and its timer.
#[derive(Clone)]
pub struct NetTransport {
    client: HyperClient<HttpsConnector<HttpConnector>, Full<Bytes>>,
}

impl NetTransport {
    pub(crate) fn new(client: HyperClient<HttpsConnector<HttpConnector>, Full<Bytes>>) -> Self {
        Self { client }
    }
}

impl Service<Request<Full<Bytes>>> for NetTransport {
    type Response = Response<ResponseBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Full<Bytes>>) -> Self::Future {
        let deadline = req.extensions().get::<Deadline>().copied();
        let fut = self.client.request(req);

        Box::pin(async move {
            let result = match deadline {
                Some(Deadline(at)) => {
                    match tokio::time::timeout_at(tokio::time::Instant::from_std(at), fut).await {
                        Ok(inner) => inner,
                        Err(_) => return Err(Error::Transport(Box::new(DeadlineExceeded))),
                    }
                }
                None => fut.await,
            };

            let response = result.map_err(Error::from)?;
            let (parts, body) = response.into_parts();
            let body: ResponseBody = body.map_err(Into::into).boxed();
            Ok(Response::from_parts(parts, body))
        })
    }
}
