//! Caches: keyed secondary indexes over the store's primary
//! arrays. Every cache stores `Arc<T>` clones — never the owning slot — so
//! eviction only has to drop the reference, not serialize or copy the
//! record.

pub mod log_cache;
pub mod metric_cache;
pub mod trace_cache;

pub use log_cache::LogCache;
pub use metric_cache::MetricCache;
pub use trace_cache::TraceCache;
