//! Wire schema: the JSON shapes returned by the HTTP query surface, plus the
//! conversions from the internal records that produce them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::attribute::attributes_to_json;
use crate::models::span::format_duration_nanos;
use crate::models::{DataPoint, LogRecord, MetricRecord, QuantileValue, SpanRecord};
use crate::topology::Topology;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanStatusWire {
    pub code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanEventWire {
    pub name: String,
    pub time_unix_nano: u64,
    pub attributes: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanLinkWire {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: serde_json::Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanWire {
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub name: String,
    pub kind: String,
    pub start_time_unix_nano: u64,
    pub end_time_unix_nano: u64,
    pub duration_nano: u64,
    pub duration_text: String,
    pub attributes: serde_json::Value,
    pub status: SpanStatusWire,
    pub events: Vec<SpanEventWire>,
    pub links: Vec<SpanLinkWire>,
    pub service_name: String,
    pub resource_attributes: serde_json::Value,
    pub scope_name: String,
    pub scope_version: String,
    pub received_at: DateTime<Utc>,
}

impl From<&SpanRecord> for SpanWire {
    fn from(span: &SpanRecord) -> Self {
        Self {
            trace_id: span.trace_id.clone(),
            span_id: span.span_id.clone(),
            parent_span_id: span.parent_span_id.clone(),
            name: span.name.clone(),
            kind: format!("{:?}", span.kind),
            start_time_unix_nano: span.start_time_unix_nano,
            end_time_unix_nano: span.end_time_unix_nano,
            duration_nano: span.duration_nanos(),
            duration_text: format_duration_nanos(span.duration_nanos()),
            attributes: attributes_to_json(&span.attributes),
            status: SpanStatusWire {
                code: format!("{:?}", span.status.code),
                message: span.status.message.clone(),
            },
            events: span
                .events
                .iter()
                .map(|e| SpanEventWire {
                    name: e.name.clone(),
                    time_unix_nano: e.time_unix_nano,
                    attributes: attributes_to_json(&e.attributes),
                })
                .collect(),
            links: span
                .links
                .iter()
                .map(|l| SpanLinkWire {
                    trace_id: l.trace_id.clone(),
                    span_id: l.span_id.clone(),
                    attributes: attributes_to_json(&l.attributes),
                })
                .collect(),
            service_name: span.service_name.clone(),
            resource_attributes: attributes_to_json(&span.resource_attributes),
            scope_name: span.scope_name.clone(),
            scope_version: span.scope_version.clone(),
            received_at: span.received_at,
        }
    }
}

pub fn spans_to_wire(spans: &[Arc<SpanRecord>]) -> Vec<SpanWire> {
    spans.iter().map(|s| SpanWire::from(s.as_ref())).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceDetailWire {
    pub trace_id: String,
    pub spans: Vec<SpanWire>,
    pub span_count: usize,
    pub services: Vec<String>,
}

pub fn trace_detail_to_wire(trace_id: &str, spans: &[Arc<SpanRecord>]) -> TraceDetailWire {
    let mut services: Vec<String> = spans.iter().map(|s| s.service_name.clone()).collect();
    services.sort();
    services.dedup();
    TraceDetailWire {
        trace_id: trace_id.to_string(),
        span_count: spans.len(),
        spans: spans_to_wire(spans),
        services,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantileValueWire {
    pub quantile: f64,
    pub value: f64,
}

impl From<&QuantileValue> for QuantileValueWire {
    fn from(q: &QuantileValue) -> Self {
        Self { quantile: q.quantile, value: q.value }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointWire {
    pub attributes: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_unix_nano: Option<u64>,
    pub time_unix_nano: u64,
    pub flags: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bucket_counts: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_bounds: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub quantile_values: Vec<QuantileValueWire>,
}

impl From<&DataPoint> for DataPointWire {
    fn from(p: &DataPoint) -> Self {
        Self {
            attributes: attributes_to_json(&p.attributes),
            start_time_unix_nano: p.start_time_unix_nano,
            time_unix_nano: p.time_unix_nano,
            flags: p.flags,
            value: p.value,
            count: p.count,
            sum: p.sum,
            bucket_counts: p.bucket_counts.clone(),
            explicit_bounds: p.explicit_bounds.clone(),
            min: p.min,
            max: p.max,
            quantile_values: p.quantile_values.iter().map(QuantileValueWire::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricWire {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub metric_type: String,
    pub data_points: Vec<DataPointWire>,
    pub service_name: String,
    pub resource_attributes: serde_json::Value,
    pub scope_name: String,
    pub scope_version: String,
    pub received_at: DateTime<Utc>,
}

impl From<&MetricRecord> for MetricWire {
    fn from(metric: &MetricRecord) -> Self {
        Self {
            name: metric.name.clone(),
            description: metric.description.clone(),
            unit: metric.unit.clone(),
            metric_type: metric.metric_type.as_str().to_string(),
            data_points: metric.data_points.iter().map(DataPointWire::from).collect(),
            service_name: metric.service_name.clone(),
            resource_attributes: attributes_to_json(&metric.resource_attributes),
            scope_name: metric.scope_name.clone(),
            scope_version: metric.scope_version.clone(),
            received_at: metric.received_at,
        }
    }
}

pub fn metrics_to_wire(metrics: &[Arc<MetricRecord>]) -> Vec<MetricWire> {
    metrics.iter().map(|m| MetricWire::from(m.as_ref())).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWire {
    pub time_unix_nano: u64,
    pub observed_time_unix_nano: u64,
    pub severity_number: u8,
    pub severity_text: String,
    pub body: String,
    pub attributes: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
    pub flags: u32,
    pub service_name: String,
    pub resource_attributes: serde_json::Value,
    pub scope_name: String,
    pub scope_version: String,
    pub received_at: DateTime<Utc>,
}

impl From<&LogRecord> for LogWire {
    fn from(log: &LogRecord) -> Self {
        Self {
            time_unix_nano: log.time_unix_nano,
            observed_time_unix_nano: log.observed_time_unix_nano,
            severity_number: log.severity_number,
            severity_text: log.severity_text.clone(),
            body: log.body.clone(),
            attributes: attributes_to_json(&log.attributes),
            trace_id: log.trace_id.clone(),
            span_id: log.span_id.clone(),
            flags: log.flags,
            service_name: log.service_name.clone(),
            resource_attributes: attributes_to_json(&log.resource_attributes),
            scope_name: log.scope_name.clone(),
            scope_version: log.scope_version.clone(),
            received_at: log.received_at,
        }
    }
}

pub fn logs_to_wire(logs: &[Arc<LogRecord>]) -> Vec<LogWire> {
    logs.iter().map(|l| LogWire::from(l.as_ref())).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyWire {
    pub nodes: Vec<crate::topology::TopologyNode>,
    pub edges: Vec<crate::topology::TopologyEdge>,
}

impl From<&Topology> for TopologyWire {
    fn from(t: &Topology) -> Self {
        Self { nodes: t.nodes.clone(), edges: t.edges.clone() }
    }
}
