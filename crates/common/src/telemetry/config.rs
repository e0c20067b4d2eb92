use opentelemetry_sdk::trace::TracerProvider as SdkTracerProvider;

/// Logging and span export settings.
///
/// Log events always go to stdout as JSON. Only spans are exported over OTLP,
/// and only when `otel_enabled` is set.
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// `service.name` resource attribute on exported spans
    pub service_name: String,
    /// OTLP gRPC collector address
    pub otel_endpoint: String,
    pub otel_enabled: bool,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "oilfield-api".to_string(),
            otel_endpoint: "http://localhost:4317".to_string(),
            otel_enabled: false,
            log_level: "info".to_string(),
        }
    }
}

/// Handle on the span exporter; pass to `shutdown_telemetry` to flush
pub struct TelemetryProviders {
    pub tracer_provider: SdkTracerProvider,
}
