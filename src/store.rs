//! The store: sole writer of the three primary arrays, owner
//! of one instance of each cache, a clock source, and the update timestamp.
//! A single `std::sync::RwLock` guards the whole of it — a blocking std lock
//! is enough since no `.await` point ever falls inside a critical section.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{LogCache, MetricCache, TraceCache};
use crate::clock::{Clock, SystemClock};
use crate::ingest::{normalize_log_batch, normalize_metric_batch, normalize_trace_batch};
use crate::models::batch::{LogBatch, MetricBatch, TraceBatch};
use crate::models::{LogRecord, MetricRecord, SpanRecord};

/// Fixed retention caps. Not configurable — the store is sized for a bounded
/// in-process buffer, not a tunable cache.
pub const MAX_SPANS: usize = 1000;
pub const MAX_METRICS: usize = 3000;
pub const MAX_LOGS: usize = 1000;

struct StoreInner {
    spans: Vec<Arc<SpanRecord>>,
    metrics: Vec<Arc<MetricRecord>>,
    logs: Vec<Arc<LogRecord>>,
    trace_cache: TraceCache,
    metric_cache: MetricCache,
    log_cache: LogCache,
    last_updated: DateTime<Utc>,
}

impl StoreInner {
    fn new(clock: &dyn Clock) -> Self {
        Self {
            spans: Vec::new(),
            metrics: Vec::new(),
            logs: Vec::new(),
            trace_cache: TraceCache::new(),
            metric_cache: MetricCache::new(),
            log_cache: LogCache::new(),
            last_updated: clock.now(),
        }
    }

    fn insert_span(&mut self, span: SpanRecord) {
        if self.spans.len() >= MAX_SPANS {
            let oldest = self.spans.remove(0);
            self.trace_cache.remove(&oldest);
        }
        let span = Arc::new(span);
        self.trace_cache.add(span.clone());
        self.spans.push(span);
    }

    fn insert_metric(&mut self, metric: MetricRecord) {
        if self.metrics.len() >= MAX_METRICS {
            let oldest = self.metrics.remove(0);
            self.metric_cache.remove(&oldest);
        }
        let metric = Arc::new(metric);
        self.metric_cache.add(metric.clone());
        self.metrics.push(metric);
    }

    fn insert_log(&mut self, log: LogRecord) {
        if self.logs.len() >= MAX_LOGS {
            let oldest = self.logs.remove(0);
            self.log_cache.remove(&oldest);
        }
        let log = Arc::new(log);
        self.log_cache.add(log.clone());
        self.logs.push(log);
    }

    /// Union of every service-carrying cache's key set, with empty strings
    /// and any value containing `"unknown"` excluded.
    fn list_services(&self) -> Vec<String> {
        let mut services: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
        for name in self.trace_cache.service_names() {
            services.insert(name.clone());
        }
        for name in self.metric_cache.service_names() {
            services.insert(name.clone());
        }
        for name in self.log_cache.service_names() {
            services.insert(name.clone());
        }
        services
            .into_iter()
            .filter(|s| !s.is_empty() && !s.contains("unknown"))
            .collect()
    }

    fn reset(&mut self, clock: &dyn Clock) {
        self.spans.clear();
        self.metrics.clear();
        self.logs.clear();
        self.trace_cache.reset();
        self.metric_cache.reset();
        self.log_cache.reset();
        self.last_updated = clock.now();
    }
}

/// Store statistics, as reported by `GET /api/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub span_count: usize,
    pub metric_count: usize,
    pub log_count: usize,
    pub trace_count: usize,
    pub service_count: usize,
    pub last_updated: DateTime<Utc>,
    pub max_service_span_count: usize,
    pub max_metric_count: usize,
    pub max_log_count: usize,
}

pub struct Store {
    inner: RwLock<StoreInner>,
    clock: Arc<dyn Clock>,
}

/// External collector adapter boundary: `pushTraces`/`pushMetrics`/`pushLogs`.
/// Each returns unconditionally — ingestion never fails.
pub trait IngestSink {
    fn push_traces(&self, batch: TraceBatch);
    fn push_metrics(&self, batch: MetricBatch);
    fn push_logs(&self, batch: LogBatch);
}

impl Store {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let inner = StoreInner::new(clock.as_ref());
        Self {
            inner: RwLock::new(inner),
            clock,
        }
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, StoreInner> {
        self.inner.read().expect("store lock poisoned")
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().expect("store lock poisoned")
    }

    /// Run `f` over a consistent read-locked snapshot of the store. Handlers
    /// build their wire response inside `f` so serialization observes a
    /// state eviction cannot change mid-flight.
    pub fn read<R>(&self, f: impl FnOnce(&StoreView<'_>) -> R) -> R {
        let guard = self.read_lock();
        f(&StoreView { inner: &guard })
    }

    pub fn reset(&self) {
        self.write_lock().reset(self.clock.as_ref());
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestSink for Store {
    fn push_traces(&self, batch: TraceBatch) {
        let records = normalize_trace_batch(batch, self.clock.as_ref());
        if records.is_empty() {
            return;
        }
        let mut inner = self.write_lock();
        for record in records {
            inner.insert_span(record);
        }
        inner.last_updated = self.clock.now();
        tracing::debug!(count = inner.spans.len(), "ingested span batch");
    }

    fn push_metrics(&self, batch: MetricBatch) {
        let records = normalize_metric_batch(batch, self.clock.as_ref());
        if records.is_empty() {
            return;
        }
        let mut inner = self.write_lock();
        for record in records {
            inner.insert_metric(record);
        }
        inner.last_updated = self.clock.now();
        tracing::debug!(count = inner.metrics.len(), "ingested metric batch");
    }

    fn push_logs(&self, batch: LogBatch) {
        let records = normalize_log_batch(batch, self.clock.as_ref());
        if records.is_empty() {
            return;
        }
        let mut inner = self.write_lock();
        for record in records {
            inner.insert_log(record);
        }
        inner.last_updated = self.clock.now();
        tracing::debug!(count = inner.logs.len(), "ingested log batch");
    }
}

/// A read-locked view over the store, handed to query closures. Every
/// accessor here is read-only — mutation only ever happens through `Store`'s
/// own `push_*` methods.
pub struct StoreView<'a> {
    inner: &'a StoreInner,
}

impl StoreView<'_> {
    pub fn spans(&self) -> &[Arc<SpanRecord>] {
        &self.inner.spans
    }

    pub fn metrics(&self) -> &[Arc<MetricRecord>] {
        &self.inner.metrics
    }

    pub fn logs(&self) -> &[Arc<LogRecord>] {
        &self.inner.logs
    }

    pub fn span_by_id(&self, span_id: &str) -> Option<Arc<SpanRecord>> {
        self.inner.trace_cache.by_id(span_id)
    }

    pub fn trace_spans(&self, trace_id: &str) -> Vec<Arc<SpanRecord>> {
        self.inner
            .trace_cache
            .by_trace_id(trace_id)
            .map(|s| s.to_vec())
            .unwrap_or_default()
    }

    pub fn trace_service_spans(&self, trace_id: &str, service: &str) -> Vec<Arc<SpanRecord>> {
        self.inner
            .trace_cache
            .by_trace_and_service(trace_id, service)
            .map(|s| s.to_vec())
            .unwrap_or_default()
    }

    pub fn metrics_by_service(&self, service: &str) -> Vec<Arc<MetricRecord>> {
        self.inner
            .metric_cache
            .by_service(service)
            .map(|s| s.to_vec())
            .unwrap_or_default()
    }

    pub fn metrics_by_service_and_name(&self, service: &str, name: &str) -> Vec<Arc<MetricRecord>> {
        self.inner
            .metric_cache
            .by_service_and_name(service, name)
            .map(|s| s.to_vec())
            .unwrap_or_default()
    }

    pub fn logs_by_trace(&self, trace_id: &str) -> Vec<Arc<LogRecord>> {
        self.inner
            .log_cache
            .by_trace_id(trace_id)
            .map(|s| s.to_vec())
            .unwrap_or_default()
    }

    pub fn list_services(&self) -> Vec<String> {
        self.inner.list_services()
    }

    /// Service-filtered metric view: substring `q` (case-insensitive) over
    /// `service + " " + metricName`. Empty `q` returns all metrics in
    /// insertion order. Recomputed on demand, nothing persisted.
    ///
    /// This is a standalone query for code embedding `Store` directly (no
    /// HTTP round trip) and does not go through the query-param-driven
    /// filter engine in `crate::filter` — the substring match happens to
    /// overlap with that engine's `service` predicate, but the two are
    /// independent entry points and are expected to stay that way.
    pub fn filtered_metrics(&self, q: &str) -> Vec<Arc<MetricRecord>> {
        if q.is_empty() {
            return self.inner.metrics.clone();
        }
        let needle = q.to_ascii_lowercase();
        self.inner
            .metrics
            .iter()
            .filter(|m| m.service_filter_haystack().to_ascii_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Service-filtered log view: substring `q` over service name, body, or
    /// severity text. Empty `q` returns all logs in insertion order.
    ///
    /// Same standalone-consumer purpose as `filtered_metrics` above: a
    /// direct `Store` caller's equivalent of the HTTP layer's `LogFilter`,
    /// not a path the handlers route through.
    pub fn filtered_logs(&self, q: &str) -> Vec<Arc<LogRecord>> {
        if q.is_empty() {
            return self.inner.logs.clone();
        }
        let needle = q.to_ascii_lowercase();
        self.inner
            .logs
            .iter()
            .filter(|l| {
                l.service_name.to_ascii_lowercase().contains(&needle)
                    || l.body.to_ascii_lowercase().contains(&needle)
                    || l.severity_text.to_ascii_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> StatsSnapshot {
        StatsSnapshot {
            span_count: self.inner.spans.len(),
            metric_count: self.inner.metrics.len(),
            log_count: self.inner.logs.len(),
            trace_count: self.inner.trace_cache.trace_count(),
            service_count: self.inner.list_services().len(),
            last_updated: self.inner.last_updated,
            max_service_span_count: MAX_SPANS,
            max_metric_count: MAX_METRICS,
            max_log_count: MAX_LOGS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::attribute::AttributeValue;
    use crate::models::batch::{RawSpan, ResourceSpans, ScopeSpans};
    use crate::models::resource::{Resource, Scope};
    use crate::models::span::{SpanKind, SpanStatus};

    fn store() -> Store {
        Store::with_clock(Arc::new(FixedClock::default()))
    }

    fn span_batch(service: &str, trace_id: &str, span_id: &str, parent: Option<&str>) -> TraceBatch {
        TraceBatch {
            resource_spans: vec![ResourceSpans {
                resource: Resource {
                    attributes: vec![(
                        "service.name".to_string(),
                        AttributeValue::String(service.to_string()),
                    )],
                },
                scope_spans: vec![ScopeSpans {
                    scope: Scope::default(),
                    spans: vec![RawSpan {
                        trace_id: trace_id.to_string(),
                        span_id: span_id.to_string(),
                        parent_span_id: parent.map(str::to_string),
                        name: "op".to_string(),
                        kind: SpanKind::Internal,
                        start_time_unix_nano: 0,
                        end_time_unix_nano: 1_000_000,
                        attributes: vec![],
                        status: SpanStatus::default(),
                        events: vec![],
                        links: vec![],
                    }],
                }],
            }],
        }
    }

    #[test]
    fn cap_is_enforced_via_fifo_eviction() {
        let store = store();
        for i in 0..(MAX_SPANS + 1) {
            store.push_traces(span_batch(&format!("s{i}"), &format!("t{i}"), &format!("sp{i}"), None));
        }
        let stats = store.read(|v| v.stats());
        assert_eq!(stats.span_count, MAX_SPANS);
        // the very first span (s0 / sp0) must be gone from every index
        assert!(store.read(|v| v.span_by_id("sp0").is_none()));
        assert!(store.read(|v| v.trace_spans("t0").is_empty()));
    }

    #[test]
    fn eviction_removes_record_from_every_index() {
        let store = store();
        store.push_traces(span_batch("front", "t0", "sp0", None));
        for i in 1..=MAX_SPANS {
            store.push_traces(span_batch(&format!("s{i}"), &format!("t{i}"), &format!("sp{i}"), None));
        }
        assert!(store.read(|v| v.span_by_id("sp0").is_none()));
        assert!(store.read(|v| v.trace_spans("t0").is_empty()));
        assert!(store.read(|v| v.trace_service_spans("t0", "front").is_empty()));
        assert!(!store.read(|v| v.list_services().contains(&"front".to_string())));
    }

    #[test]
    fn list_services_excludes_empty_and_unknown() {
        let store = store();
        store.push_traces(span_batch("unknown", "t0", "sp0", None));
        store.push_traces(span_batch("checkout", "t1", "sp1", None));
        let services = store.read(|v| v.list_services());
        assert_eq!(services, vec!["checkout".to_string()]);
    }

    #[test]
    fn stats_reports_caps_and_counts() {
        let store = store();
        store.push_traces(span_batch("front", "t0", "sp0", None));
        store.push_traces(span_batch("back", "t0", "sp1", Some("sp0")));
        let stats = store.read(|v| v.stats());
        assert_eq!(stats.span_count, 2);
        assert_eq!(stats.trace_count, 1);
        assert_eq!(stats.service_count, 2);
        assert_eq!(stats.max_service_span_count, MAX_SPANS);
        assert_eq!(stats.max_metric_count, MAX_METRICS);
        assert_eq!(stats.max_log_count, MAX_LOGS);
    }

    #[test]
    fn reset_clears_everything() {
        let store = store();
        store.push_traces(span_batch("front", "t0", "sp0", None));
        store.reset();
        let stats = store.read(|v| v.stats());
        assert_eq!(stats.span_count, 0);
        assert_eq!(stats.trace_count, 0);
    }

    #[test]
    fn filtered_metrics_empty_query_returns_everything_in_insertion_order() {
        use crate::models::batch::{MetricBatch, RawMetric, ResourceMetrics, ScopeMetrics};
        use crate::models::metric::MetricType;

        let store = store();
        let batch = MetricBatch {
            resource_metrics: vec![ResourceMetrics {
                resource: Resource {
                    attributes: vec![(
                        "service.name".to_string(),
                        AttributeValue::String("checkout".to_string()),
                    )],
                },
                scope_metrics: vec![ScopeMetrics {
                    scope: Scope::default(),
                    metrics: vec![RawMetric {
                        name: "cpu.usage".to_string(),
                        description: None,
                        unit: None,
                        metric_type: MetricType::Gauge,
                        data_points: vec![],
                    }],
                }],
            }],
        };
        store.push_metrics(batch);
        let all = store.read(|v| v.filtered_metrics(""));
        assert_eq!(all.len(), 1);
        let matched = store.read(|v| v.filtered_metrics("checkout cpu"));
        assert_eq!(matched.len(), 1);
        let unmatched = store.read(|v| v.filtered_metrics("nonexistent"));
        assert!(unmatched.is_empty());
    }
}
