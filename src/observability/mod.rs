//! Tracing with file-based OpenTelemetry export.
//!
//! ```text
//! tracing → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → JSON lines
//! ```
//!
//! Spans are written as OTLP JSON to `devicedesk-otlp.json` in the data
//! directory, rotating at 10 MB with three backups. Each event handled by the
//! app layer opens a span; the API worker task that serves it is parented to
//! that span through the request's trace context, so one trace covers an
//! interaction from input to response.
//!
//! - `init`: subscriber setup
//! - `tracer`: provider and file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::FileWriter;
pub use init::{init_tracing, TRACE_FILE_NAME};
