//! "Already-decoded" batch shapes handed to the ingest normalizer.
//!
//! These mirror OTLP's resource → scope → datum nesting
//! (`ResourceSpans` → `ScopeSpans` → `Span`, and the metric/log analogues)
//! without depending on `opentelemetry-proto`/`tonic`/`prost`: decoding the
//! wire format is an adapter concern handled upstream — the
//! collector hands the core these plain structs already populated.

use super::attribute::AttributeSet;
use super::metric::{DataPoint, MetricType};
use super::resource::{Resource, Scope};
use super::span::{SpanKind, SpanStatus};

#[derive(Debug, Clone)]
pub struct RawSpan {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: Option<String>,
    pub name: String,
    pub kind: SpanKind,
    pub start_time_unix_nano: u64,
    pub end_time_unix_nano: u64,
    pub attributes: AttributeSet,
    pub status: SpanStatus,
    pub events: Vec<RawSpanEvent>,
    pub links: Vec<RawSpanLink>,
}

#[derive(Debug, Clone)]
pub struct RawSpanEvent {
    pub name: String,
    pub time_unix_nano: u64,
    pub attributes: AttributeSet,
}

#[derive(Debug, Clone)]
pub struct RawSpanLink {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: AttributeSet,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<RawSpan>,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceSpans {
    pub resource: Resource,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Clone, Default)]
pub struct TraceBatch {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Clone)]
pub struct RawMetric {
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub metric_type: MetricType,
    pub data_points: Vec<DataPoint>,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeMetrics {
    pub scope: Scope,
    pub metrics: Vec<RawMetric>,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceMetrics {
    pub resource: Resource,
    pub scope_metrics: Vec<ScopeMetrics>,
}

#[derive(Debug, Clone, Default)]
pub struct MetricBatch {
    pub resource_metrics: Vec<ResourceMetrics>,
}

#[derive(Debug, Clone)]
pub struct RawLog {
    pub time_unix_nano: u64,
    pub observed_time_unix_nano: u64,
    pub severity_number: u8,
    pub severity_text: String,
    pub body: String,
    pub attributes: AttributeSet,
    pub trace_id: Option<String>,
    pub span_id: Option<String>,
    pub flags: u32,
}

#[derive(Debug, Clone, Default)]
pub struct ScopeLogs {
    pub scope: Scope,
    pub logs: Vec<RawLog>,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceLogs {
    pub resource: Resource,
    pub scope_logs: Vec<ScopeLogs>,
}

#[derive(Debug, Clone, Default)]
pub struct LogBatch {
    pub resource_logs: Vec<ResourceLogs>,
}
