use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

use crate::filter::{apply_metric_filter, MetricFilter};
use crate::store::Store;
use crate::wire::metrics_to_wire;

pub async fn list_metrics(
    State(store): State<Arc<Store>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let filter = MetricFilter::from_params(&params);
    store.read(|view| {
        let page = apply_metric_filter(view.metrics(), &filter);
        super::paginated_json(metrics_to_wire(&page.items), page.total, page.filtered, page.offset, page.limit)
    })
}

/// Metrics for one service. Absence yields an empty array, not a 404.
pub async fn metrics_by_service(State(store): State<Arc<Store>>, Path(service): Path<String>) -> Json<Vec<crate::wire::MetricWire>> {
    store.read(|view| Json(metrics_to_wire(&view.metrics_by_service(&service))))
}

pub async fn metric_timeseries(
    State(store): State<Arc<Store>>,
    Path((service, metric_name)): Path<(String, String)>,
) -> Result<Json<Vec<crate::wire::MetricWire>>, crate::error::ApiError> {
    store.read(|view| {
        let metrics = view.metrics_by_service_and_name(&service, &metric_name);
        if metrics.is_empty() {
            return Err(crate::error::ApiError::not_found("Metric"));
        }
        Ok(Json(metrics_to_wire(&metrics)))
    })
}
