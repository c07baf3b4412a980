//! Tower layers for the transport-decorator chain.
//!
//! Each layer wraps an existing transport and returns a new one with added
//! behavior, leaving the request/response contract unchanged:
//!
//! - [`TimeoutLayer`] - tightens the request deadline (never loosens it)
//! - [`TraceLayer`] - client tracing span + W3C trace-context propagation
//! - [`LoggingLayer`] - one structured log record per request
//!
//! Layers added to a [`RequestBuilder`](crate::RequestBuilder) compose
//! first-added-outermost: `[D1, D2, D3]` executes `D1 → D2 → D3 → base`,
//! with responses and errors propagating back through `D3 → D2 → D1`.

mod log;
mod timeout;
mod trace;

pub use log::{LOG_TARGET, LoggingLayer, LoggingService};
pub use timeout::{DEFAULT_TIMEOUT, TimeoutLayer, TimeoutService};
pub use trace::{TraceLayer, TraceService};
