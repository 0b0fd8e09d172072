//! Subscriber assembly and exporter lifecycle.

use std::iter;

use opentelemetry::{global, trace::TracerProvider as _};
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, telemetry::TelemetryConfig};

use super::{ObservabilityError, otel, settings};

/// Crates whose spans carry cascade runs, claims and requests.
const REPRIEVE_TARGETS: [&str; 3] = ["reprieve", "reprieve_app", "reprieve_json"];

type FmtLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the span exporter alive until shutdown.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    pub(crate) fn init(config: &TelemetryConfig) -> Result<Self, ObservabilityError> {
        settings::apply(config);

        let tracer_provider = if config.otel_enabled {
            global::set_text_map_propagator(TraceContextPropagator::new());

            Some(otel::tracer_provider(config)?)
        } else {
            None
        };

        let otel_layer = tracer_provider.as_ref().map(|provider| {
            tracing_opentelemetry::layer().with_tracer(provider.tracer(env!("CARGO_PKG_NAME")))
        });

        tracing_subscriber::registry()
            .with(fmt_layer(config.log_format))
            .with(otel_layer)
            .with(env_filter(&config.log_level))
            .try_init()?;

        Ok(Self { tracer_provider })
    }

    /// Flush buffered spans.
    pub(crate) fn shutdown(self) {
        let Some(provider) = self.tracer_provider else {
            return;
        };

        if let Err(source) = provider.shutdown() {
            error!("failed to shutdown tracer provider: {source}");
        }
    }
}

fn fmt_layer(format: LogFormat) -> FmtLayer {
    match format {
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_target(true)
            .boxed(),
        // Span list puts `cascade.*` and `rescue_requests.*` context on every line.
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

/// `RUST_LOG` wins when set. Otherwise the reprieve crates log at `level` and the rest at `warn`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(default_directives(level))
            .unwrap_or_else(|_| EnvFilter::new(default_directives("info")))
    })
}

fn default_directives(level: &str) -> String {
    iter::once("warn".to_owned())
        .chain(
            REPRIEVE_TARGETS
                .iter()
                .map(|target| format!("{target}={level}")),
        )
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_scope_level_to_reprieve_crates() {
        assert_eq!(
            default_directives("debug"),
            "warn,reprieve=debug,reprieve_app=debug,reprieve_json=debug"
        );
    }

    #[test]
    fn unknown_level_is_rejected_by_filter() {
        assert!(
            EnvFilter::try_new(default_directives("loud")).is_err(),
            "expected an invalid level to be rejected"
        );
    }
}
