//! Ingest normalizer: flattens resource/scope/datum batches
//! into per-datum records denormalized with resource, scope, and identity
//! fields. Never fails — malformed fields degrade to empty strings / zero
//! timestamps rather than being rejected.

use crate::clock::Clock;
use crate::models::batch::{LogBatch, MetricBatch, TraceBatch};
use crate::models::log::LogRecord;
use crate::models::metric::MetricRecord;
use crate::models::span::{SpanEvent, SpanLink, SpanRecord, SpanStatus};

pub fn normalize_trace_batch(batch: TraceBatch, clock: &dyn Clock) -> Vec<SpanRecord> {
    let mut out = Vec::new();
    for resource_spans in batch.resource_spans {
        let service_name = resource_spans.resource.service_name();
        for scope_spans in resource_spans.scope_spans {
            for raw in scope_spans.spans {
                let received_at = clock.now();
                out.push(SpanRecord {
                    trace_id: raw.trace_id,
                    span_id: raw.span_id,
                    parent_span_id: raw.parent_span_id.filter(|p| !p.is_empty()),
                    name: raw.name,
                    kind: raw.kind,
                    start_time_unix_nano: raw.start_time_unix_nano,
                    end_time_unix_nano: raw.end_time_unix_nano,
                    attributes: raw.attributes,
                    status: raw.status,
                    events: raw
                        .events
                        .into_iter()
                        .map(|e| SpanEvent {
                            name: e.name,
                            time_unix_nano: e.time_unix_nano,
                            attributes: e.attributes,
                        })
                        .collect(),
                    links: raw
                        .links
                        .into_iter()
                        .map(|l| SpanLink {
                            trace_id: l.trace_id,
                            span_id: l.span_id,
                            attributes: l.attributes,
                        })
                        .collect(),
                    service_name: service_name.clone(),
                    resource_attributes: resource_spans.resource.attributes.clone(),
                    scope_name: scope_spans.scope.name.clone(),
                    scope_version: scope_spans.scope.version.clone(),
                    received_at,
                });
            }
        }
    }
    out
}

pub fn normalize_metric_batch(batch: MetricBatch, clock: &dyn Clock) -> Vec<MetricRecord> {
    let mut out = Vec::new();
    for resource_metrics in batch.resource_metrics {
        let service_name = resource_metrics.resource.service_name();
        for scope_metrics in resource_metrics.scope_metrics {
            for raw in scope_metrics.metrics {
                out.push(MetricRecord {
                    name: raw.name,
                    description: raw.description,
                    unit: raw.unit,
                    metric_type: raw.metric_type,
                    data_points: raw.data_points,
                    service_name: service_name.clone(),
                    resource_attributes: resource_metrics.resource.attributes.clone(),
                    scope_name: scope_metrics.scope.name.clone(),
                    scope_version: scope_metrics.scope.version.clone(),
                    received_at: clock.now(),
                });
            }
        }
    }
    out
}

pub fn normalize_log_batch(batch: LogBatch, clock: &dyn Clock) -> Vec<LogRecord> {
    let mut out = Vec::new();
    for resource_logs in batch.resource_logs {
        let service_name = resource_logs.resource.service_name();
        for scope_logs in resource_logs.scope_logs {
            for raw in scope_logs.logs {
                out.push(LogRecord {
                    time_unix_nano: raw.time_unix_nano,
                    observed_time_unix_nano: raw.observed_time_unix_nano,
                    severity_number: raw.severity_number,
                    severity_text: raw.severity_text,
                    body: raw.body,
                    attributes: raw.attributes,
                    trace_id: raw.trace_id.filter(|t| !t.is_empty()),
                    span_id: raw.span_id.filter(|s| !s.is_empty()),
                    flags: raw.flags,
                    service_name: service_name.clone(),
                    resource_attributes: resource_logs.resource.attributes.clone(),
                    scope_name: scope_logs.scope.name.clone(),
                    scope_version: scope_logs.scope.version.clone(),
                    received_at: clock.now(),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::attribute::AttributeValue;
    use crate::models::batch::{RawSpan, ResourceSpans, ScopeSpans};
    use crate::models::resource::{Resource, Scope};
    use crate::models::span::SpanKind;

    fn raw_span(trace_id: &str, span_id: &str, parent: Option<&str>) -> RawSpan {
        RawSpan {
            trace_id: trace_id.to_string(),
            span_id: span_id.to_string(),
            parent_span_id: parent.map(str::to_string),
            name: "op".to_string(),
            kind: SpanKind::Internal,
            start_time_unix_nano: 0,
            end_time_unix_nano: 100,
            attributes: vec![],
            status: SpanStatus::default(),
            events: vec![],
            links: vec![],
        }
    }

    #[test]
    fn service_name_is_resolved_once_from_resource() {
        let clock = FixedClock::default();
        let batch = TraceBatch {
            resource_spans: vec![ResourceSpans {
                resource: Resource {
                    attributes: vec![(
                        "service.name".to_string(),
                        AttributeValue::String("checkout".to_string()),
                    )],
                },
                scope_spans: vec![ScopeSpans {
                    scope: Scope {
                        name: "lib".to_string(),
                        version: "1.0".to_string(),
                    },
                    spans: vec![raw_span("t1", "s1", None)],
                }],
            }],
        };
        let records = normalize_trace_batch(batch, &clock);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].service_name, "checkout");
        assert_eq!(records[0].scope_name, "lib");
    }

    #[test]
    fn empty_parent_span_id_is_normalized_to_none() {
        let clock = FixedClock::default();
        let batch = TraceBatch {
            resource_spans: vec![ResourceSpans {
                resource: Resource::default(),
                scope_spans: vec![ScopeSpans {
                    scope: Scope::default(),
                    spans: vec![raw_span("t1", "s1", Some(""))],
                }],
            }],
        };
        let records = normalize_trace_batch(batch, &clock);
        assert_eq!(records[0].parent_span_id, None);
        assert_eq!(records[0].service_name, "unknown");
    }

    #[test]
    fn multiple_scopes_each_emit_their_own_scope_identity() {
        let clock = FixedClock::default();
        let batch = TraceBatch {
            resource_spans: vec![ResourceSpans {
                resource: Resource::default(),
                scope_spans: vec![
                    ScopeSpans {
                        scope: Scope { name: "a".into(), version: "1".into() },
                        spans: vec![raw_span("t", "s1", None)],
                    },
                    ScopeSpans {
                        scope: Scope { name: "b".into(), version: "2".into() },
                        spans: vec![raw_span("t", "s2", Some("s1"))],
                    },
                ],
            }],
        };
        let records = normalize_trace_batch(batch, &clock);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].scope_name, "a");
        assert_eq!(records[1].scope_name, "b");
        assert_eq!(records[1].parent_span_id.as_deref(), Some("s1"));
    }
}
