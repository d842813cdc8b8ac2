use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ApiError;
use crate::filter::{apply_trace_filter, TraceFilter};
use crate::store::Store;
use crate::wire::{spans_to_wire, trace_detail_to_wire};

pub async fn list_traces(
    State(store): State<Arc<Store>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let filter = TraceFilter::from_params(&params);
    store.read(|view| {
        let page = apply_trace_filter(view.spans(), &filter);
        super::paginated_json(spans_to_wire(&page.items), page.total, page.filtered, page.offset, page.limit)
    })
}

pub async fn get_trace(
    State(store): State<Arc<Store>>,
    Path(trace_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    store.read(|view| {
        let spans = view.trace_spans(&trace_id);
        if spans.is_empty() {
            return Err(ApiError::not_found("Trace"));
        }
        Ok(Json(trace_detail_to_wire(&trace_id, &spans)))
    })
}

pub async fn get_trace_service(
    State(store): State<Arc<Store>>,
    Path((trace_id, service)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    store.read(|view| {
        let spans = view.trace_service_spans(&trace_id, &service);
        if spans.is_empty() {
            return Err(ApiError::not_found("Trace"));
        }
        Ok(Json(spans_to_wire(&spans)))
    })
}

pub async fn get_span(
    State(store): State<Arc<Store>>,
    Path(span_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    store.read(|view| match view.span_by_id(&span_id) {
        Some(span) => Ok(Json(crate::wire::SpanWire::from(span.as_ref()))),
        None => Err(ApiError::not_found("Span")),
    })
}
