pub mod attribute;
pub mod batch;
pub mod log;
pub mod metric;
pub mod resource;
pub mod span;

pub use attribute::{AttributeSet, AttributeValue};
pub use log::LogRecord;
pub use metric::{DataPoint, MetricRecord, MetricType, QuantileValue};
pub use resource::{Resource, Scope};
pub use span::{SpanEvent, SpanKind, SpanLink, SpanRecord, SpanStatus, StatusCode};
