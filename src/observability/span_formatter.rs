//! Flat JSON rendering of finished spans.
//!
//! Each span becomes one self-contained object, suitable for `jq` or for
//! grepping a span file by `name` or attribute.

use opentelemetry::trace::{Event, SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde_json::{json, Map, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Renders one finished span as a JSON object.
///
/// ```json
/// {"service":"listkeeper","name":"reorder_item","trace_id":"…","span_id":"…",
///  "parent_span_id":"…","start_unix_nano":1,"duration_us":42,
///  "attributes":{"from":0,"to":2},"events":[{"name":"item reordered", ...}],
///  "status":"unset"}
/// ```
pub fn format_span(service: &str, span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        JsonValue::Null
    } else {
        JsonValue::String(format!("{:016x}", span.parent_span_id))
    };
    let duration_us = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

    json!({
        "service": service,
        "name": span.name,
        "trace_id": format!("{:032x}", span.span_context.trace_id()),
        "span_id": format!("{:016x}", span.span_context.span_id()),
        "parent_span_id": parent,
        "start_unix_nano": unix_nanos(span.start_time),
        "duration_us": duration_us,
        "attributes": attributes(&span.attributes),
        "events": events(&span.events),
        "status": status(&span.status),
    })
}

fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

fn attributes(attrs: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attrs
        .iter()
        .map(|kv| (kv.key.to_string(), value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::I64(i) => JsonValue::from(*i),
        Value::F64(f) => JsonValue::from(*f),
        Value::String(s) => JsonValue::String(s.to_string()),
        Value::Array(_) => JsonValue::String(format!("{value:?}")),
    }
}

fn events(events: &[Event]) -> JsonValue {
    events
        .iter()
        .map(|event| {
            json!({
                "name": event.name,
                "unix_nano": unix_nanos(event.timestamp),
                "attributes": attributes(&event.attributes),
            })
        })
        .collect()
}

fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}
