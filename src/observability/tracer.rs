//! Tracer provider exporting spans to a rotating JSON-lines file.

use super::file_writer::RotatingFile;
use super::span_formatter::format_span;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported span as one JSON line.
#[derive(Debug)]
struct JsonLinesExporter {
    service: &'static str,
    file: RotatingFile,
    is_shutdown: AtomicBool,
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let mut lines = String::new();
        for span in &batch {
            if !lines.is_empty() {
                lines.push('\n');
            }
            let _ = write!(lines, "{}", format_span(self.service, span));
        }

        let result = if lines.is_empty() {
            Ok(())
        } else {
            self.file
                .write_line(&lines)
                .map_err(|e| TraceError::from(e.to_string()))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

/// Builds a provider that exports every finished span immediately.
pub fn create_tracer_provider(
    service: &'static str,
    file: RotatingFile,
    resource: Resource,
) -> TracerProvider {
    let exporter = JsonLinesExporter {
        service,
        file,
        is_shutdown: AtomicBool::new(false),
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
