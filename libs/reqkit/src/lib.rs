//! Fluent HTTP request builder with a composable transport-decorator
//! pipeline.
//!
//! A request is described declaratively — URL, method, headers, query
//! parameters, a structured body, a structured response target — and
//! executed through a chain of cross-cutting behaviors wrapped around the
//! base network transport:
//!
//! - [`TraceLayer`] - client tracing span + W3C trace-context propagation
//! - [`LoggingLayer`] - one structured log record per request
//! - [`TimeoutLayer`] - deadline enforcement that never loosens a
//!   caller-imposed deadline
//!
//! Decorators are ordinary [`tower::Layer`]s over the [`BoxTransport`]
//! capability, so custom behaviors compose the same way the built-in ones
//! do. Bodies go through a pluggable [`Codec`] (JSON by default).
//!
//! # Example
//!
//! ```ignore
//! use reqkit::{Client, LoggingLayer, TimeoutLayer, TraceLayer};
//! use std::time::Duration;
//!
//! #[derive(serde::Serialize)]
//! struct Ask { q: String }
//!
//! #[derive(serde::Deserialize)]
//! struct Answer { text: String }
//!
//! let client = Client::new()?;
//! let answer: Answer = client
//!     .request()
//!     .base_url("https://api.example.com")
//!     .url("/ask")
//!     .method(http::Method::POST)
//!     .body(&Ask { q: "status".into() })
//!     .layer(TraceLayer::new("demo"))
//!     .layer(LoggingLayer::new("demo"))
//!     .layer(TimeoutLayer::new(Duration::from_secs(2)))
//!     .recv()
//!     .await?;
//! ```
//!
//! Tracing export is host-owned: call [`Telemetry::init`] once at startup
//! (it reads `TRACE_ENDPOINT` for an optional OTLP collector), attach its
//! layer to your `tracing` subscriber, and shut it down on exit.

mod builder;
mod client;
mod codec;
mod config;
mod context;
mod error;
pub mod layers;
pub mod otel;
mod response;
pub mod telemetry;
mod tls;
mod transport;

pub use builder::RequestBuilder;
pub use client::{Client, ClientBuilder};
pub use codec::{Codec, Json};
pub use config::{ClientConfig, TlsRootConfig};
pub use context::{Deadline, TraceId};
pub use error::{BoxError, DeadlineExceeded, Error, InvalidUriKind};
pub use layers::{
    DEFAULT_TIMEOUT, LOG_TARGET, LoggingLayer, LoggingService, TimeoutLayer, TimeoutService,
    TraceLayer, TraceService,
};
pub use response::HttpResponse;
pub use telemetry::Telemetry;
pub use transport::{BoxTransport, NetTransport, ResponseBody};
