//! Filter / sort / paginate engine: pure, stateless. Consumes
//! a slice, produces a slice plus total/filtered counts. Parameter parsing
//! never fails — unparseable values degrade to defaults.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::log::severity_threshold;
use crate::models::{LogRecord, MetricRecord, MetricType, SpanRecord, StatusCode};

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Pagination {
    fn from_params(params: &HashMap<String, String>) -> Self {
        let offset = params
            .get("offset")
            .and_then(|v| v.parse::<i64>().ok())
            .map(|v| v.max(0) as usize)
            .unwrap_or(0);
        let limit = params
            .get("limit")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .map(|v| (v as usize).min(MAX_LIMIT))
            .unwrap_or(DEFAULT_LIMIT);
        Self { offset, limit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Time,
    Duration,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Accepts either RFC3339 text or a decimal integer interpreted as Unix
/// milliseconds. Invalid values are silently ignored (treated as absent).
fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
}

fn parse_time_range(params: &HashMap<String, String>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let start = params.get("start_time").and_then(|v| parse_time(v));
    let end = params.get("end_time").and_then(|v| parse_time(v));
    (start, end)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

/// A page of results plus the counts the HTTP surface reports via
/// `X-Total-Count` / `X-Filtered-Count`.
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub filtered: usize,
    pub offset: usize,
    pub limit: usize,
}

fn paginate<T: Clone>(items: Vec<T>, pagination: Pagination) -> Vec<T> {
    items
        .into_iter()
        .skip(pagination.offset)
        .take(pagination.limit)
        .collect()
}

// ───────────────────────── Trace filter ─────────────────────────

pub struct TraceFilter {
    pub service: Option<String>,
    pub status: Option<StatusCode>,
    pub min_duration_ms: Option<u64>,
    pub max_duration_ms: Option<u64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub pagination: Pagination,
}

impl TraceFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let (start_time, end_time) = parse_time_range(params);
        let sort_key = match params.get("sort_by").map(String::as_str) {
            Some("duration") => SortKey::Duration,
            Some("name") => SortKey::Name,
            _ => SortKey::Time,
        };
        let sort_order = match params.get("sort_order").map(String::as_str) {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        };
        Self {
            service: params.get("service").filter(|s| !s.is_empty()).cloned(),
            status: params.get("status").and_then(|s| StatusCode::parse_filter_value(s)),
            min_duration_ms: params.get("min_duration_ms").and_then(|v| v.parse().ok()),
            max_duration_ms: params.get("max_duration_ms").and_then(|v| v.parse().ok()),
            start_time,
            end_time,
            sort_key,
            sort_order,
            pagination: Pagination::from_params(params),
        }
    }

    fn matches(&self, span: &SpanRecord) -> bool {
        if let Some(service) = &self.service {
            if !contains_ci(&span.service_filter_haystack(), service) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if span.status.code != status {
                return false;
            }
        }
        let duration_ms = span.duration_millis();
        if let Some(min) = self.min_duration_ms {
            if duration_ms < min as f64 {
                return false;
            }
        }
        if let Some(max) = self.max_duration_ms {
            if duration_ms > max as f64 {
                return false;
            }
        }
        if let Some(start) = self.start_time {
            if span.received_at < start {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if span.received_at > end {
                return false;
            }
        }
        true
    }
}

pub fn apply_trace_filter(spans: &[Arc<SpanRecord>], filter: &TraceFilter) -> PageResult<Arc<SpanRecord>> {
    let total = spans.len();
    let mut survivors: Vec<Arc<SpanRecord>> = spans.iter().filter(|s| filter.matches(s)).cloned().collect();
    let filtered = survivors.len();

    survivors.sort_by(|a, b| {
        let ordering = match filter.sort_key {
            SortKey::Time => a.received_at.cmp(&b.received_at),
            SortKey::Duration => a.duration_nanos().cmp(&b.duration_nanos()),
            SortKey::Name => a.name.cmp(&b.name),
        };
        let ordering = match filter.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        };
        // Tie-break by received-at descending regardless of primary order.
        ordering.then_with(|| b.received_at.cmp(&a.received_at))
    });

    let items = paginate(survivors, filter.pagination);
    PageResult {
        items,
        total,
        filtered,
        offset: filter.pagination.offset,
        limit: filter.pagination.limit,
    }
}

// ───────────────────────── Log filter ─────────────────────────

pub struct LogFilter {
    pub service: Option<String>,
    pub severity_substr: Option<String>,
    pub min_severity: u8,
    pub body_substr: Option<String>,
    pub trace_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub pagination: Pagination,
}

impl LogFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let (start_time, end_time) = parse_time_range(params);
        let min_severity = params
            .get("min_severity")
            .map(|v| severity_threshold(v))
            .unwrap_or(0);
        Self {
            service: params.get("service").filter(|s| !s.is_empty()).cloned(),
            severity_substr: params.get("severity").filter(|s| !s.is_empty()).cloned(),
            min_severity,
            body_substr: params.get("body").filter(|s| !s.is_empty()).cloned(),
            trace_id: params.get("trace_id").filter(|s| !s.is_empty()).cloned(),
            start_time,
            end_time,
            pagination: Pagination::from_params(params),
        }
    }

    fn matches(&self, log: &LogRecord) -> bool {
        if let Some(service) = &self.service {
            if !contains_ci(&log.service_name, service) {
                return false;
            }
        }
        if let Some(severity) = &self.severity_substr {
            if !contains_ci(&log.severity_text, severity) {
                return false;
            }
        }
        if self.min_severity > 0 && log.severity_number < self.min_severity {
            return false;
        }
        if let Some(body) = &self.body_substr {
            if !contains_ci(&log.body, body) {
                return false;
            }
        }
        if let Some(trace_id) = &self.trace_id {
            if log.trace_id.as_deref() != Some(trace_id.as_str()) {
                return false;
            }
        }
        if let Some(start) = self.start_time {
            if log.received_at < start {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if log.received_at > end {
                return false;
            }
        }
        true
    }
}

pub fn apply_log_filter(logs: &[Arc<LogRecord>], filter: &LogFilter) -> PageResult<Arc<LogRecord>> {
    let total = logs.len();
    // Logs are returned in insertion order (no sort key is specified for them).
    let survivors: Vec<Arc<LogRecord>> = logs.iter().filter(|l| filter.matches(l)).cloned().collect();
    let filtered = survivors.len();
    let items = paginate(survivors, filter.pagination);
    PageResult {
        items,
        total,
        filtered,
        offset: filter.pagination.offset,
        limit: filter.pagination.limit,
    }
}

// ───────────────────────── Metric filter ─────────────────────────

pub struct MetricFilter {
    pub service: Option<String>,
    pub metric_name_substr: Option<String>,
    pub metric_type: Option<MetricType>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub pagination: Pagination,
}

impl MetricFilter {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let (start_time, end_time) = parse_time_range(params);
        let metric_type = params.get("type").and_then(|t| match t.to_ascii_lowercase().as_str() {
            "gauge" => Some(MetricType::Gauge),
            "sum" => Some(MetricType::Sum),
            "histogram" => Some(MetricType::Histogram),
            "exponentialhistogram" => Some(MetricType::ExponentialHistogram),
            "summary" => Some(MetricType::Summary),
            _ => None,
        });
        Self {
            service: params.get("service").filter(|s| !s.is_empty()).cloned(),
            metric_name_substr: params.get("name").filter(|s| !s.is_empty()).cloned(),
            metric_type,
            start_time,
            end_time,
            pagination: Pagination::from_params(params),
        }
    }

    fn matches(&self, metric: &MetricRecord) -> bool {
        if let Some(service) = &self.service {
            if !contains_ci(&metric.service_filter_haystack(), service) {
                return false;
            }
        }
        if let Some(name) = &self.metric_name_substr {
            if !contains_ci(&metric.name, name) {
                return false;
            }
        }
        if let Some(metric_type) = self.metric_type {
            if !metric.metric_type.matches_filter_value(metric_type.as_str()) {
                return false;
            }
        }
        if let Some(start) = self.start_time {
            if metric.received_at < start {
                return false;
            }
        }
        if let Some(end) = self.end_time {
            if metric.received_at > end {
                return false;
            }
        }
        true
    }
}

pub fn apply_metric_filter(metrics: &[Arc<MetricRecord>], filter: &MetricFilter) -> PageResult<Arc<MetricRecord>> {
    let total = metrics.len();
    let survivors: Vec<Arc<MetricRecord>> = metrics.iter().filter(|m| filter.matches(m)).cloned().collect();
    let filtered = survivors.len();
    let items = paginate(survivors, filter.pagination);
    PageResult {
        items,
        total,
        filtered,
        offset: filter.pagination.offset,
        limit: filter.pagination.limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::span::{SpanKind, SpanStatus};
    use chrono::Utc;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn span(service: &str, name: &str, status: StatusCode, duration_ms: u64) -> Arc<SpanRecord> {
        Arc::new(SpanRecord {
            trace_id: "t".into(),
            span_id: format!("{service}-{name}"),
            parent_span_id: None,
            name: name.to_string(),
            kind: SpanKind::Internal,
            start_time_unix_nano: 0,
            end_time_unix_nano: duration_ms * 1_000_000,
            attributes: vec![],
            status: crate::models::span::SpanStatus { code: status, message: String::new() },
            events: vec![],
            links: vec![],
            service_name: service.to_string(),
            resource_attributes: vec![],
            scope_name: String::new(),
            scope_version: String::new(),
            received_at: Utc::now(),
        })
    }

    #[test]
    fn pagination_defaults_and_clamps() {
        let p = Pagination::from_params(&params(&[]));
        assert_eq!(p, Pagination { offset: 0, limit: 100 });

        let p = Pagination::from_params(&params(&[("offset", "-5"), ("limit", "99999")]));
        assert_eq!(p, Pagination { offset: 0, limit: 1000 });

        let p = Pagination::from_params(&params(&[("limit", "0")]));
        assert_eq!(p.limit, 100);
    }

    #[test]
    fn status_filter_counts_match_scenario_4() {
        let spans: Vec<Arc<SpanRecord>> = (0..2)
            .map(|i| span("svc", &format!("err{i}"), StatusCode::Error, 10))
            .chain((0..5).map(|i| span("svc", &format!("ok{i}"), StatusCode::Ok, 10)))
            .chain((0..3).map(|i| span("svc", &format!("uns{i}"), StatusCode::Unset, 10)))
            .collect();

        let filter = TraceFilter::from_params(&params(&[("status", "error")]));
        let page = apply_trace_filter(&spans, &filter);
        assert_eq!(page.total, 10);
        assert_eq!(page.filtered, 2);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn duration_range_and_sort_match_scenario_5() {
        let durations = [10, 200, 50, 1000, 300];
        let spans: Vec<Arc<SpanRecord>> = durations
            .iter()
            .enumerate()
            .map(|(i, d)| span("svc", &format!("s{i}"), StatusCode::Ok, *d))
            .collect();

        let filter = TraceFilter::from_params(&params(&[
            ("min_duration_ms", "100"),
            ("max_duration_ms", "500"),
            ("sort_by", "duration"),
            ("sort_order", "asc"),
        ]));
        let page = apply_trace_filter(&spans, &filter);
        let got: Vec<u64> = page.items.iter().map(|s| s.duration_nanos() / 1_000_000).collect();
        assert_eq!(got, vec![200, 300]);
    }

    #[test]
    fn severity_filter_matches_scenario_6() {
        use crate::models::LogRecord;

        let severities = [1u8, 9, 13, 17, 21];
        let logs: Vec<Arc<LogRecord>> = severities
            .iter()
            .map(|&sev| {
                Arc::new(LogRecord {
                    time_unix_nano: 0,
                    observed_time_unix_nano: 0,
                    severity_number: sev,
                    severity_text: "X".to_string(),
                    body: "hello".to_string(),
                    attributes: vec![],
                    trace_id: None,
                    span_id: None,
                    flags: 0,
                    service_name: "svc".to_string(),
                    resource_attributes: vec![],
                    scope_name: String::new(),
                    scope_version: String::new(),
                    received_at: Utc::now(),
                })
            })
            .collect();

        let filter = LogFilter::from_params(&params(&[("min_severity", "warn")]));
        let page = apply_log_filter(&logs, &filter);
        assert_eq!(page.filtered, 3);

        let filter = LogFilter::from_params(&params(&[("min_severity", "bogus")]));
        let page = apply_log_filter(&logs, &filter);
        assert_eq!(page.filtered, 5);
    }

    #[test]
    fn filter_idempotence() {
        let spans: Vec<Arc<SpanRecord>> = vec![
            span("front", "GET /", StatusCode::Ok, 10),
            span("back", "query", StatusCode::Error, 500),
        ];
        let filter = TraceFilter::from_params(&params(&[("status", "ok")]));
        let first = apply_trace_filter(&spans, &filter);
        let second = apply_trace_filter(&first.items, &filter);
        assert_eq!(first.items.len(), second.items.len());
        assert_eq!(first.items[0].span_id, second.items[0].span_id);
    }

    #[test]
    fn pagination_totality_reconstructs_full_filtered_list() {
        let spans: Vec<Arc<SpanRecord>> = (0..23)
            .map(|i| span("svc", &format!("s{i}"), StatusCode::Ok, 10))
            .collect();
        let base_filter = TraceFilter::from_params(&params(&[]));
        let full = apply_trace_filter(&spans, &base_filter);

        let limit = 5usize;
        let mut reconstructed: Vec<String> = Vec::new();
        let mut offset = 0usize;
        loop {
            let page_params = params(&[("offset", &offset.to_string()), ("limit", &limit.to_string())]);
            let filter = TraceFilter::from_params(&page_params);
            let page = apply_trace_filter(&spans, &filter);
            if page.items.is_empty() {
                break;
            }
            reconstructed.extend(page.items.iter().map(|s| s.span_id.clone()));
            offset += limit;
        }
        let full_ids: Vec<String> = full.items.iter().map(|s| s.span_id.clone()).collect();
        assert_eq!(reconstructed, full_ids);
    }
}
