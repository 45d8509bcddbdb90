//! Tracing and OpenTelemetry setup
//!
//! Events go to stderr as JSON, leaving stdout to the results. When enabled, spans are also
//! exported over OTLP/HTTP, configured through the standard `OTEL_*` environment variables.
use miette::{IntoDiagnostic, WrapErr};
use opentelemetry::InstrumentationScope;
use opentelemetry::trace::TracerProvider;
use opentelemetry_resource_detectors::{HostResourceDetector, OsResourceDetector};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::resource::{EnvResourceDetector, ResourceDetector};
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};
use tracing::{Subscriber, debug};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config;

/// Directives used when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "rae=warn,dle=warn";

/// Returns the filter from `RUST_LOG`, or [`DEFAULT_FILTER`] if it's unset or invalid.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Describes this process to the collector.
fn resource() -> Resource {
    let detectors: [Box<dyn ResourceDetector>; 3] = [
        Box::new(EnvResourceDetector::default()),
        Box::new(OsResourceDetector),
        Box::new(HostResourceDetector::default()),
    ];

    Resource::builder_empty()
        .with_service_name(env!("CARGO_PKG_NAME"))
        .with_detectors(&detectors)
        .build()
}

/// Builds a layer that exports spans over OTLP/HTTP in batches.
///
/// The provider is also installed globally so it outlives this function.
fn otlp_layer<S>() -> miette::Result<OpenTelemetryLayer<S, SdkTracer>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .build()
        .into_diagnostic()
        .wrap_err("building otlp http exporter failed")?;
    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource())
        .build();
    let scope = InstrumentationScope::builder(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .build();
    let tracer = provider.tracer_with_scope(scope);

    opentelemetry::global::set_tracer_provider(provider);

    Ok(tracing_opentelemetry::layer().with_tracer(tracer))
}

/// Initializes the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the exporter can't be built or a global subscriber is already set.
pub fn try_init(tracing: &config::TracingConfig) -> miette::Result<()> {
    let otlp = tracing.enabled.then(otlp_layer).transpose()?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(otlp)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .into_diagnostic()
        .wrap_err("could not init registry")?;

    debug!(otlp = tracing.enabled, "tracing initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_is_valid() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
