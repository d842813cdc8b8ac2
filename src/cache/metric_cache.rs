use std::collections::HashMap;
use std::sync::Arc;

use crate::models::MetricRecord;

/// Keyed secondary indexes over the metric array.
#[derive(Debug, Default)]
pub struct MetricCache {
    metrics_by_service_and_name: HashMap<(String, String), Vec<Arc<MetricRecord>>>,
    metrics_by_service: HashMap<String, Vec<Arc<MetricRecord>>>,
}

impl MetricCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, metric: Arc<MetricRecord>) {
        self.metrics_by_service_and_name
            .entry((metric.service_name.clone(), metric.name.clone()))
            .or_default()
            .push(metric.clone());
        self.metrics_by_service
            .entry(metric.service_name.clone())
            .or_default()
            .push(metric);
    }

    pub fn remove(&mut self, metric: &Arc<MetricRecord>) {
        let service_name_key = (metric.service_name.clone(), metric.name.clone());
        if let Some(slice) = self.metrics_by_service_and_name.get_mut(&service_name_key) {
            slice.retain(|m| !Arc::ptr_eq(m, metric));
            if slice.is_empty() {
                self.metrics_by_service_and_name.remove(&service_name_key);
            }
        }

        if let Some(slice) = self.metrics_by_service.get_mut(&metric.service_name) {
            slice.retain(|m| !Arc::ptr_eq(m, metric));
            if slice.is_empty() {
                self.metrics_by_service.remove(&metric.service_name);
            }
        }
    }

    pub fn by_service_and_name(&self, service: &str, name: &str) -> Option<&[Arc<MetricRecord>]> {
        self.metrics_by_service_and_name
            .get(&(service.to_string(), name.to_string()))
            .map(Vec::as_slice)
    }

    pub fn by_service(&self, service: &str) -> Option<&[Arc<MetricRecord>]> {
        self.metrics_by_service.get(service).map(Vec::as_slice)
    }

    pub fn service_names(&self) -> impl Iterator<Item = &String> {
        self.metrics_by_service.keys()
    }

    pub fn reset(&mut self) {
        self.metrics_by_service_and_name.clear();
        self.metrics_by_service.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metric::MetricType;
    use chrono::Utc;

    fn metric(service: &str, name: &str) -> Arc<MetricRecord> {
        Arc::new(MetricRecord {
            name: name.to_string(),
            description: None,
            unit: None,
            metric_type: MetricType::Gauge,
            data_points: vec![],
            service_name: service.to_string(),
            resource_attributes: vec![],
            scope_name: String::new(),
            scope_version: String::new(),
            received_at: Utc::now(),
        })
    }

    #[test]
    fn add_and_remove_round_trip() {
        let mut cache = MetricCache::new();
        let m = metric("checkout", "cpu.usage");
        cache.add(m.clone());

        assert_eq!(cache.by_service_and_name("checkout", "cpu.usage").unwrap().len(), 1);
        assert_eq!(cache.by_service("checkout").unwrap().len(), 1);

        cache.remove(&m);
        assert!(cache.by_service_and_name("checkout", "cpu.usage").is_none());
        assert!(cache.by_service("checkout").is_none());
    }
}
