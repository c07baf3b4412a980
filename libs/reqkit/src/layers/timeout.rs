use crate::context::Deadline;
use http::{Request, Response};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tower::{Layer, Service};

/// Default per-request budget when none (or zero) is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Tower layer that bounds each request with a deadline.
///
/// Installs a [`Deadline`] extension of `now + duration` — unless the request
/// already carries an earlier one, which is left untouched: a caller-imposed
/// shorter deadline always wins, and an existing deadline is never loosened.
///
/// Enforcement belongs to the context-aware base transport; this layer races
/// no timer of its own, so there is nothing to release on any exit path.
#[derive(Debug, Clone)]
pub struct TimeoutLayer {
    duration: Duration,
}

impl TimeoutLayer {
    /// Layer with the given per-request budget. A zero duration falls back
    /// to [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        let duration = if duration.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            duration
        };
        Self { duration }
    }
}

impl Default for TimeoutLayer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TimeoutService {
            inner,
            duration: self.duration,
        }
    }
}

/// Service that tightens the request deadline before delegating.
#[derive(Debug, Clone)]
pub struct TimeoutService<S> {
    inner: S,
    duration: Duration,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for TimeoutService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let candidate = Deadline(Instant::now() + self.duration);
        let tighter = match req.extensions().get::<Deadline>() {
            Some(existing) => candidate < *existing,
            None => true,
        };
        if tighter {
            req.extensions_mut().insert(candidate);
        }
        self.inner.call(req)
    }
}
