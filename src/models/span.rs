//! Span record: the denormalized, store-resident view over one trace span.

use chrono::{DateTime, Utc};

use super::attribute::AttributeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanKind {
    #[default]
    Unspecified,
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusCode {
    #[default]
    Unset,
    Ok,
    Error,
}

impl StatusCode {
    /// Parse the `status` query parameter value (`ok`, `error`, `unset`),
    /// case-insensitive. Unrecognized text yields `None` (predicate disabled).
    pub fn parse_filter_value(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Some(StatusCode::Ok),
            "error" => Some(StatusCode::Error),
            "unset" => Some(StatusCode::Unset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpanStatus {
    pub code: StatusCode,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpanEvent {
    pub name: String,
    pub time_unix_nano: u64,
    pub attributes: AttributeSet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpanLink {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: AttributeSet,
}

/// One flattened span, ready for store insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanRecord {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub name: String,
    pub kind: SpanKind,
    pub start_time_unix_nano: u64,
    pub end_time_unix_nano: u64,
    pub attributes: AttributeSet,
    pub status: SpanStatus,
    pub events: Vec<SpanEvent>,
    pub links: Vec<SpanLink>,
    pub service_name: String,
    pub resource_attributes: AttributeSet,
    pub scope_name: String,
    pub scope_version: String,
    pub received_at: DateTime<Utc>,
}

impl SpanRecord {
    pub fn duration_nanos(&self) -> u64 {
        self.end_time_unix_nano
            .saturating_sub(self.start_time_unix_nano)
    }

    pub fn duration_millis(&self) -> f64 {
        self.duration_nanos() as f64 / 1_000_000.0
    }

    /// Haystack used by the trace "service" filter: `service + " " + name`.
    /// A span-name query can match even though the field is documented as
    /// "service".
    pub fn service_filter_haystack(&self) -> String {
        format!("{} {}", self.service_name, self.name)
    }
}

/// Render a duration in nanoseconds as a short human-readable string, e.g.
/// `"1.23ms"`, `"820\u{3bc}s"`, `"4.50s"`.
pub fn format_duration_nanos(nanos: u64) -> String {
    if nanos < 1_000 {
        format!("{nanos}ns")
    } else if nanos < 1_000_000 {
        format!("{:.2}\u{b5}s", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}
