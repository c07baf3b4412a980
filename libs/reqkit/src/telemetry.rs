//! Host-owned tracing lifecycle.
//!
//! Nothing here runs at load time: the hosting application calls
//! [`Telemetry::init`] once at startup, attaches [`Telemetry::layer`] to its
//! `tracing` subscriber, and calls [`Telemetry::shutdown`] during graceful
//! shutdown to flush the exporter. When [`TRACE_ENDPOINT_ENV`] is unset the
//! provider carries no exporter — spans still get valid contexts locally,
//! they just go nowhere.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::propagation::TraceContextPropagator;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};

/// Environment variable naming the OTLP gRPC endpoint spans are exported to.
pub const TRACE_ENDPOINT_ENV: &str = "TRACE_ENDPOINT";

/// Handle to the installed tracer provider.
///
/// Keep it alive for the process lifetime; `opentelemetry` 0.31 has no global
/// shutdown, so flushing happens through this handle.
pub struct Telemetry {
    provider: SdkTracerProvider,
}

impl Telemetry {
    /// Install the W3C propagator and a global tracer provider for
    /// `service_name`, exporting spans over OTLP/gRPC when
    /// [`TRACE_ENDPOINT_ENV`] is set.
    #[must_use]
    pub fn init(service_name: &str) -> Self {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let resource = Resource::builder_empty()
            .with_attributes([KeyValue::new("service.name", service_name.to_owned())])
            .build();

        let mut builder = SdkTracerProvider::builder()
            .with_sampler(Sampler::AlwaysOn)
            .with_resource(resource);

        let endpoint = std::env::var(TRACE_ENDPOINT_ENV)
            .ok()
            .filter(|v| !v.is_empty());
        match endpoint {
            Some(endpoint) => {
                match opentelemetry_otlp::SpanExporter::builder()
                    .with_tonic()
                    .with_endpoint(endpoint.clone())
                    .build()
                {
                    Ok(exporter) => {
                        tracing::info!(%endpoint, "exporting trace spans over OTLP");
                        builder = builder.with_batch_exporter(exporter);
                    }
                    Err(err) => {
                        tracing::warn!(
                            error = %err,
                            %endpoint,
                            "failed to build OTLP exporter; spans stay local"
                        );
                    }
                }
            }
            None => tracing::debug!("trace endpoint not configured; spans stay local"),
        }

        let provider = builder.build();
        global::set_tracer_provider(provider.clone());

        Self { provider }
    }

    /// `tracing-opentelemetry` layer for the host's subscriber stack.
    pub fn layer<S>(
        &self,
    ) -> tracing_opentelemetry::OpenTelemetryLayer<S, opentelemetry_sdk::trace::Tracer>
    where
        S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
    {
        tracing_opentelemetry::OpenTelemetryLayer::new(self.provider.tracer("reqkit"))
    }

    /// Flush pending spans and shut the provider down.
    pub fn shutdown(self) {
        if let Err(err) = self.provider.shutdown() {
            tracing::warn!(error = %err, "trace provider shutdown failed");
        }
    }
}
