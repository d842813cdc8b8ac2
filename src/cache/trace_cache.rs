use std::collections::HashMap;
use std::sync::Arc;

use crate::models::SpanRecord;

/// Keyed secondary indexes over the span array.
#[derive(Debug, Default)]
pub struct TraceCache {
    span_by_id: HashMap<String, Arc<SpanRecord>>,
    spans_by_trace_id: HashMap<String, Vec<Arc<SpanRecord>>>,
    spans_by_trace_and_service: HashMap<(String, String), Vec<Arc<SpanRecord>>>,
    spans_by_service: HashMap<String, Vec<Arc<SpanRecord>>>,
}

impl TraceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, span: Arc<SpanRecord>) {
        self.span_by_id.insert(span.span_id.clone(), span.clone());
        self.spans_by_trace_id
            .entry(span.trace_id.clone())
            .or_default()
            .push(span.clone());
        self.spans_by_trace_and_service
            .entry((span.trace_id.clone(), span.service_name.clone()))
            .or_default()
            .push(span.clone());
        self.spans_by_service
            .entry(span.service_name.clone())
            .or_default()
            .push(span);
    }

    /// Remove this exact record (by identity, not value) from every index.
    pub fn remove(&mut self, span: &Arc<SpanRecord>) {
        self.span_by_id.remove(&span.span_id);

        if let Some(slice) = self.spans_by_trace_id.get_mut(&span.trace_id) {
            slice.retain(|s| !Arc::ptr_eq(s, span));
            if slice.is_empty() {
                self.spans_by_trace_id.remove(&span.trace_id);
            }
        }

        let trace_service_key = (span.trace_id.clone(), span.service_name.clone());
        if let Some(slice) = self.spans_by_trace_and_service.get_mut(&trace_service_key) {
            slice.retain(|s| !Arc::ptr_eq(s, span));
            if slice.is_empty() {
                self.spans_by_trace_and_service.remove(&trace_service_key);
            }
        }

        if let Some(slice) = self.spans_by_service.get_mut(&span.service_name) {
            slice.retain(|s| !Arc::ptr_eq(s, span));
            if slice.is_empty() {
                self.spans_by_service.remove(&span.service_name);
            }
        }
    }

    pub fn by_id(&self, span_id: &str) -> Option<Arc<SpanRecord>> {
        self.span_by_id.get(span_id).cloned()
    }

    pub fn by_trace_id(&self, trace_id: &str) -> Option<&[Arc<SpanRecord>]> {
        self.spans_by_trace_id.get(trace_id).map(Vec::as_slice)
    }

    pub fn by_trace_and_service(&self, trace_id: &str, service: &str) -> Option<&[Arc<SpanRecord>]> {
        self.spans_by_trace_and_service
            .get(&(trace_id.to_string(), service.to_string()))
            .map(Vec::as_slice)
    }

    pub fn by_service(&self, service: &str) -> Option<&[Arc<SpanRecord>]> {
        self.spans_by_service.get(service).map(Vec::as_slice)
    }

    /// Distinct service names currently carrying at least one span.
    pub fn service_names(&self) -> impl Iterator<Item = &String> {
        self.spans_by_service.keys()
    }

    pub fn trace_count(&self) -> usize {
        self.spans_by_trace_id.len()
    }

    pub fn reset(&mut self) {
        self.span_by_id.clear();
        self.spans_by_trace_id.clear();
        self.spans_by_trace_and_service.clear();
        self.spans_by_service.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::span::{SpanKind, SpanStatus};
    use chrono::Utc;

    fn span(trace_id: &str, span_id: &str, service: &str) -> Arc<SpanRecord> {
        Arc::new(SpanRecord {
            trace_id: trace_id.to_string(),
            span_id: span_id.to_string(),
            parent_span_id: None,
            name: "op".to_string(),
            kind: SpanKind::Internal,
            start_time_unix_nano: 0,
            end_time_unix_nano: 0,
            attributes: vec![],
            status: SpanStatus::default(),
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
    fn add_indexes_across_all_four_maps() {
        let mut cache = TraceCache::new();
        let s = span("t1", "s1", "front");
        cache.add(s.clone());

        assert!(cache.by_id("s1").is_some());
        assert_eq!(cache.by_trace_id("t1").unwrap().len(), 1);
        assert_eq!(cache.by_trace_and_service("t1", "front").unwrap().len(), 1);
        assert_eq!(cache.by_service("front").unwrap().len(), 1);
    }

    #[test]
    fn remove_clears_empty_keys_entirely() {
        let mut cache = TraceCache::new();
        let s = span("t1", "s1", "front");
        cache.add(s.clone());
        cache.remove(&s);

        assert!(cache.by_id("s1").is_none());
        assert!(cache.by_trace_id("t1").is_none());
        assert!(cache.by_trace_and_service("t1", "front").is_none());
        assert!(cache.by_service("front").is_none());
        assert_eq!(cache.trace_count(), 0);
    }

    #[test]
    fn remove_only_removes_the_named_identity() {
        let mut cache = TraceCache::new();
        let a = span("t1", "s1", "front");
        let b = span("t1", "s2", "front");
        cache.add(a.clone());
        cache.add(b.clone());

        cache.remove(&a);

        assert!(cache.by_id("s1").is_none());
        assert!(cache.by_id("s2").is_some());
        assert_eq!(cache.by_trace_id("t1").unwrap().len(), 1);
    }

    #[test]
    fn service_names_enumerate_only_live_services() {
        let mut cache = TraceCache::new();
        let a = span("t1", "s1", "front");
        cache.add(a.clone());
        assert_eq!(cache.service_names().count(), 1);
        cache.remove(&a);
        assert_eq!(cache.service_names().count(), 0);
    }
}
