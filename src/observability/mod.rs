//! Span export for offline debugging.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → rotating file
//! ```
//!
//! Every public operation of the core opens a `tracing` span (`add_item`,
//! `reorder_item`, `json_slot_set`, ...). Once [`init_tracing`] has run, each
//! finished span is appended as a single JSON object to
//! `listkeeper-spans.jsonl` in the data directory.
//!
//! # Modules
//!
//! - `init`: subscriber and filter setup
//! - `tracer`: tracer provider and span exporter
//! - `span_formatter`: span-to-JSON rendering
//! - `file_writer`: size-rotated output file

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
