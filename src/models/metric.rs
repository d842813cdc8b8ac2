//! Metric record: the denormalized, store-resident view over one metric
//! datum and its data points.

use chrono::{DateTime, Utc};

use super::attribute::AttributeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Gauge,
    Sum,
    Histogram,
    ExponentialHistogram,
    Summary,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Gauge => "Gauge",
            MetricType::Sum => "Sum",
            MetricType::Histogram => "Histogram",
            MetricType::ExponentialHistogram => "ExponentialHistogram",
            MetricType::Summary => "Summary",
        }
    }

    /// Case-insensitive match against the `type` query parameter.
    pub fn matches_filter_value(&self, s: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantileValue {
    pub quantile: f64,
    pub value: f64,
}

/// Shape varies by `MetricType`; unused fields stay `None`/empty per the
/// point's own kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPoint {
    pub attributes: AttributeSet,
    pub start_time_unix_nano: Option<u64>,
    pub time_unix_nano: u64,
    pub flags: u32,

    // Gauge / Sum
    pub value: Option<f64>,

    // Histogram / ExponentialHistogram
    pub count: Option<u64>,
    pub sum: Option<f64>,
    pub bucket_counts: Vec<u64>,
    pub explicit_bounds: Vec<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,

    // Summary
    pub quantile_values: Vec<QuantileValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub name: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub metric_type: MetricType,
    pub data_points: Vec<DataPoint>,
    pub service_name: String,
    pub resource_attributes: AttributeSet,
    pub scope_name: String,
    pub scope_version: String,
    pub received_at: DateTime<Utc>,
}

impl MetricRecord {
    /// Haystack for the metric "service" filter: `service + " " + metricName`.
    pub fn service_filter_haystack(&self) -> String {
        format!("{} {}", self.service_name, self.name)
    }
}
