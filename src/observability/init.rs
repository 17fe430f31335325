//! Subscriber setup.

use super::file_writer::RotatingFile;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "listkeeper";
const SPAN_FILE: &str = "listkeeper-spans.jsonl";

/// Installs the global tracing subscriber.
///
/// Spans pass an [`EnvFilter`] built from `RUST_LOG` if set, else
/// `config.trace_level`, else `"info"`, and are exported as JSON lines to
/// `listkeeper-spans.jsonl` in the data directory, rotated per
/// `trace_max_bytes` and `trace_backups`.
///
/// Returns `false` without installing anything if the data directory cannot be
/// created or a global subscriber already exists. Tracing is optional; the
/// core works the same without it.
///
/// # Example
///
/// ```rust,no_run
/// use listkeeper::observability::init_tracing;
/// use listkeeper::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let file = RotatingFile::new(
        data_dir.join(SPAN_FILE),
        config.trace_max_bytes,
        config.trace_backups,
    );
    let provider = tracer::create_tracer_provider(SERVICE_NAME, file, resource);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)));

    subscriber.try_init().is_ok()
}
