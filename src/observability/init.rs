use super::span_formatter::SCOPE_NAME;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const TRACE_FILE_NAME: &str = "devicedesk-otlp.json";

/// Installs the global subscriber.
///
/// Spans always go to `<data dir>/devicedesk-otlp.json`. With `verbose`, log
/// events are also printed to stderr. The filter is `RUST_LOG` if set, else
/// `config.trace_level`, else `info`.
///
/// Observability is optional: if the data directory cannot be created only the
/// stderr layer is installed, and a second call is a no-op.
pub fn init_tracing(config: &Config, verbose: bool) {
    let level = config.trace_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .boxed()
    });

    let data_dir = crate::infrastructure::paths::get_data_dir();
    let otel_layer = std::fs::create_dir_all(&data_dir).ok().map(|()| {
        let resource = Resource::new(vec![
            opentelemetry::KeyValue::new("service.name", SCOPE_NAME),
            opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]);
        let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
        OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(stderr_layer)
        .try_init();
}
