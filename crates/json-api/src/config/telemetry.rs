//! Telemetry Config

use clap::Args;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs carrying the enclosing cascade and claim spans.
    Json,
}

/// Logging, trace export and slow request settings.
#[derive(Debug, Args)]
pub struct TelemetryConfig {
    /// Level for the reprieve crates. Other crates log at `warn`. `RUST_LOG` overrides both.
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Export spans over OTLP gRPC.
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// OTLP gRPC endpoint for span export.
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otlp_endpoint: String,

    /// Share of root traces to sample, in range [0.0, 1.0].
    #[arg(long, env = "OTEL_TRACES_SAMPLER_ARG", default_value_t = 1.0_f64)]
    pub trace_sample_ratio: f64,

    /// Continue traces named by an incoming `traceparent` header. Needs export enabled.
    #[arg(long, env = "TRACE_PARENT_PROPAGATION", default_value_t = false)]
    pub trace_parent_propagation: bool,

    /// Requests slower than this are logged as warnings.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}
