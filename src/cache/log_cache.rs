use std::collections::HashMap;
use std::sync::Arc;

use crate::models::LogRecord;

/// Keyed secondary indexes over the log array.
///
/// `logs_by_trace_id` entries are keyed only when the log carries a
/// non-empty trace id (the normalizer already maps empty strings to `None`).
#[derive(Debug, Default)]
pub struct LogCache {
    logs_by_trace_id: HashMap<String, Vec<Arc<LogRecord>>>,
    logs_by_service: HashMap<String, Vec<Arc<LogRecord>>>,
}

impl LogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, log: Arc<LogRecord>) {
        if let Some(trace_id) = log.trace_id.clone() {
            self.logs_by_trace_id.entry(trace_id).or_default().push(log.clone());
        }
        self.logs_by_service
            .entry(log.service_name.clone())
            .or_default()
            .push(log);
    }

    pub fn remove(&mut self, log: &Arc<LogRecord>) {
        if let Some(trace_id) = &log.trace_id {
            if let Some(slice) = self.logs_by_trace_id.get_mut(trace_id) {
                slice.retain(|l| !Arc::ptr_eq(l, log));
                if slice.is_empty() {
                    self.logs_by_trace_id.remove(trace_id);
                }
            }
        }

        if let Some(slice) = self.logs_by_service.get_mut(&log.service_name) {
            slice.retain(|l| !Arc::ptr_eq(l, log));
            if slice.is_empty() {
                self.logs_by_service.remove(&log.service_name);
            }
        }
    }

    pub fn by_trace_id(&self, trace_id: &str) -> Option<&[Arc<LogRecord>]> {
        self.logs_by_trace_id.get(trace_id).map(Vec::as_slice)
    }

    pub fn by_service(&self, service: &str) -> Option<&[Arc<LogRecord>]> {
        self.logs_by_service.get(service).map(Vec::as_slice)
    }

    pub fn service_names(&self) -> impl Iterator<Item = &String> {
        self.logs_by_service.keys()
    }

    pub fn reset(&mut self) {
        self.logs_by_trace_id.clear();
        self.logs_by_service.clear();
    }
}
