use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

use crate::error::ApiError;
use crate::filter::{apply_log_filter, LogFilter};
use crate::store::Store;
use crate::wire::{logs_to_wire, LogWire};

pub async fn list_logs(
    State(store): State<Arc<Store>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let filter = LogFilter::from_params(&params);
    store.read(|view| {
        let page = apply_log_filter(view.logs(), &filter);
        super::paginated_json(logs_to_wire(&page.items), page.total, page.filtered, page.offset, page.limit)
    })
}

pub async fn logs_by_trace(
    State(store): State<Arc<Store>>,
    Path(trace_id): Path<String>,
) -> Result<Json<Vec<LogWire>>, ApiError> {
    store.read(|view| {
        let logs = view.logs_by_trace(&trace_id);
        if logs.is_empty() {
            return Err(ApiError::not_found("Trace"));
        }
        Ok(Json(logs_to_wire(&logs)))
    })
}
